use serde::{Deserialize, Serialize};

/// Structured result of analyzing one food description.
///
/// Field names follow the wire shape the model is asked to produce, which is
/// also the shape persisted in the log file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionRecord {
    pub food_name: String,
    /// kcal per standard serving.
    pub calories: f64,
    /// grams
    pub protein: f64,
    /// grams
    pub fat: f64,
    /// grams
    pub carbohydrates: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    /// Free text, e.g. "1 medium apple".
    pub serving_size: String,
    /// Inclusive range 1–100.
    pub health_score: f64,
    pub summary: String,
    pub benefits: Vec<String>,
}

impl NutritionRecord {
    /// Checks the numeric invariants the model is asked to honor: macro
    /// values non-negative, health score inside [1, 100].
    pub fn validate(&self) -> Result<(), String> {
        let macros = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("fat", self.fat),
            ("carbohydrates", self.carbohydrates),
            ("fiber", self.fiber.unwrap_or(0.0)),
            ("sugar", self.sugar.unwrap_or(0.0)),
        ];
        for (name, value) in macros {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        if !(1.0..=100.0).contains(&self.health_score) {
            return Err(format!(
                "healthScore must be within [1, 100], got {}",
                self.health_score
            ));
        }
        Ok(())
    }
}
