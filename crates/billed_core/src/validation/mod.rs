use serde::Serialize;

use crate::models::bill::Bill;

pub mod rules;

// The structure of a failure
#[derive(Debug, Serialize, Clone)]
pub struct ValidationError {
    pub code: String,     // e.g., "BILL-004"
    pub severity: String, // "High Error", "Warning"
    pub message: String,  // "pct must be between 1 and 100"
    pub field: Option<String>, // Which field failed?
}

impl ValidationError {
    pub fn is_blocking(&self) -> bool {
        self.severity.contains("High")
    }
}

// The contract every rule must fulfill
pub trait ValidationRule {
    fn check(&self, bill: &Bill) -> Vec<ValidationError>;
    fn rule_id(&self) -> &str;
}

// The Engine that holds the registry of all rules
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule<R: ValidationRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn run(&self, bill: &Bill) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for rule in &self.rules {
            let mut rule_errors = rule.check(bill);
            errors.append(&mut rule_errors);
        }
        errors
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}
