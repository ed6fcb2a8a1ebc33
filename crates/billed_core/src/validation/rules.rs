use crate::is_known_expense_type;
use crate::models::bill::Bill;
use crate::validation::{ValidationError, ValidationRule};

// =========================================================================
// RULE: BILL-001
// "A bill must carry its owner's email"
// =========================================================================
pub struct RuleBill001;

impl ValidationRule for RuleBill001 {
    fn rule_id(&self) -> &str {
        "BILL-001"
    }

    fn check(&self, bill: &Bill) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if bill.email.trim().is_empty() {
            errors.push(ValidationError {
                code: self.rule_id().to_string(),
                severity: "High Error".to_string(),
                message: "Bill has no owner email".to_string(),
                field: Some("email".to_string()),
            });
        }
        errors
    }
}

// =========================================================================
// RULE: BILL-002
// "Amount must be present and strictly positive"
// =========================================================================
pub struct RuleBill002;

impl ValidationRule for RuleBill002 {
    fn rule_id(&self) -> &str {
        "BILL-002"
    }

    fn check(&self, bill: &Bill) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        match bill.amount {
            None => errors.push(ValidationError {
                code: self.rule_id().to_string(),
                severity: "High Error".to_string(),
                message: "Amount is missing or not a number".to_string(),
                field: Some("amount".to_string()),
            }),
            Some(amount) if amount <= 0 => errors.push(ValidationError {
                code: self.rule_id().to_string(),
                severity: "High Error".to_string(),
                message: format!("Amount must be positive, got {}", amount),
                field: Some("amount".to_string()),
            }),
            Some(_) => {}
        }
        errors
    }
}

// =========================================================================
// RULE: BILL-003
// "Expense date must be present"
// =========================================================================
pub struct RuleBill003;

impl ValidationRule for RuleBill003 {
    fn rule_id(&self) -> &str {
        "BILL-003"
    }

    fn check(&self, bill: &Bill) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if bill.date.is_none() {
            errors.push(ValidationError {
                code: self.rule_id().to_string(),
                severity: "High Error".to_string(),
                message: "Expense date is missing or unparsable".to_string(),
                field: Some("date".to_string()),
            });
        }
        errors
    }
}

// =========================================================================
// RULE: BILL-004
// "pct must be between 1 and 100"
// =========================================================================
pub struct RuleBill004;

impl ValidationRule for RuleBill004 {
    fn rule_id(&self) -> &str {
        "BILL-004"
    }

    fn check(&self, bill: &Bill) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !(1..=100).contains(&bill.pct) {
            errors.push(ValidationError {
                code: self.rule_id().to_string(),
                severity: "High Error".to_string(),
                message: format!("pct must be between 1 and 100, got {}", bill.pct),
                field: Some("pct".to_string()),
            });
        }
        errors
    }
}

// =========================================================================
// RULE: BILL-005
// "A referenced receipt must be a jpg, jpeg or png file"
// =========================================================================
pub struct RuleBill005;

impl ValidationRule for RuleBill005 {
    fn rule_id(&self) -> &str {
        "BILL-005"
    }

    fn check(&self, bill: &Bill) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if let Some(file_name) = &bill.file_name {
            let extension = file_name.rsplit('.').next().unwrap_or("").to_lowercase();
            if !matches!(extension.as_str(), "jpg" | "jpeg" | "png") {
                errors.push(ValidationError {
                    code: self.rule_id().to_string(),
                    severity: "High Error".to_string(),
                    message: format!("Receipt '{}' is not a jpg, jpeg or png file", file_name),
                    field: Some("fileName".to_string()),
                });
            }
        }
        errors
    }
}

// =========================================================================
// RULE: BILL-006
// "Expense type should come from the fixed picklist"
// =========================================================================
pub struct RuleBill006;

impl ValidationRule for RuleBill006 {
    fn rule_id(&self) -> &str {
        "BILL-006"
    }

    fn check(&self, bill: &Bill) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !is_known_expense_type(&bill.expense_type) {
            errors.push(ValidationError {
                code: self.rule_id().to_string(),
                severity: "Warning".to_string(),
                message: format!("Unknown expense type '{}'", bill.expense_type),
                field: Some("type".to_string()),
            });
        }
        errors
    }
}

// =========================================================================
// RULE: BILL-007
// "A bill without a receipt is accepted but worth flagging"
// =========================================================================
pub struct RuleBill007;

impl ValidationRule for RuleBill007 {
    fn rule_id(&self) -> &str {
        "BILL-007"
    }

    fn check(&self, bill: &Bill) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if bill.file_url.is_none() {
            errors.push(ValidationError {
                code: self.rule_id().to_string(),
                severity: "Warning".to_string(),
                message: "No receipt attached to this bill".to_string(),
                field: Some("fileUrl".to_string()),
            });
        }
        errors
    }
}
