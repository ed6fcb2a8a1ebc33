use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use uuid::Uuid;

use billed_core::listing::{build_rows, BillRow};
use billed_core::models::bill::Bill;
use billed_core::models::receipt::{
    is_supported_media_type, CreatedReceipt, ReceiptPayload, UNSUPPORTED_FORMAT_MESSAGE,
};

use crate::AppState;

/// GET /bills — sorted display rows. A fetch failure renders the error's
/// message text in place of the list.
pub async fn list_bills(
    State(state): State<AppState>,
) -> Result<Json<Vec<BillRow>>, (StatusCode, String)> {
    match state.service.list_bills().await {
        Ok(bills) => Ok(Json(build_rows(bills))),
        Err(e) => {
            tracing::error!("Failed to fetch bills: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// POST /bills — multipart receipt upload ("file" + "email" fields).
/// Unsupported formats are refused here, before anything is read into
/// storage.
pub async fn upload_receipt(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CreatedReceipt>, (StatusCode, String)> {
    let mut email = String::new();
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("email") => {
                email = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("justificatif").to_string();
                let media_type = field.content_type().unwrap_or("").to_string();

                if !is_supported_media_type(&media_type) {
                    return Err((
                        StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        UNSUPPORTED_FORMAT_MESSAGE.to_string(),
                    ));
                }

                let content = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                file = Some((file_name, media_type, content.to_vec()));
            }
            _ => {}
        }
    }

    let (file_name, media_type, content) = file.ok_or((
        StatusCode::BAD_REQUEST,
        "Missing 'file' field".to_string(),
    ))?;

    let payload = ReceiptPayload {
        email,
        file_name,
        media_type,
        content,
    };

    match state.service.upload_receipt(payload).await {
        Ok(created) => Ok(Json(created)),
        Err(e) => {
            tracing::error!("Receipt upload failed: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// PUT /bills/{key} — persist the complete bill record assembled by the
/// client, keyed by the receipt upload.
pub async fn submit_bill(
    State(state): State<AppState>,
    Path(key): Path<Uuid>,
    Json(bill): Json<Bill>,
) -> Result<StatusCode, (StatusCode, String)> {
    match state.service.submit_bill(Some(key), &bill).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            tracing::error!("Failed to persist bill {}: {:?}", key, e);
            let status = if e.to_string().starts_with("Bill rejected") {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Err((status, e.to_string()))
        }
    }
}

/// GET /bills/{key}/receipt — the "view proof" action: redirect to the
/// stored receipt image.
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(key): Path<Uuid>,
) -> Result<Redirect, (StatusCode, String)> {
    match state.service.get_bill(key).await {
        Ok(bill) => match bill.file_url {
            Some(url) => Ok(Redirect::temporary(&url)),
            None => Err((
                StatusCode::NOT_FOUND,
                "Justificatif introuvable".to_string(),
            )),
        },
        Err(e) => {
            tracing::error!("Failed to fetch bill {}: {:?}", key, e);
            Err((StatusCode::NOT_FOUND, format!("Bill not found: {}", key)))
        }
    }
}
