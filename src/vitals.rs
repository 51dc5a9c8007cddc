//! Health tracker vitals: body-mass index from weight and height.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Healthy
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Caption under the BMI figure.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Below healthy range",
            Self::Healthy => "Healthy range",
            Self::Overweight => "Above healthy range",
            Self::Obese => "Well above healthy range",
        }
    }
}

/// BMI rounded to one decimal place. `None` unless both inputs are
/// positive, finite numbers.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !(weight_kg.is_finite() && height_cm.is_finite()) || weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    Some((raw * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_for_tracker_defaults() {
        let value = bmi(65.0, 165.0).unwrap();
        assert_eq!(value, 23.9);
        assert_eq!(BmiCategory::from_bmi(value), BmiCategory::Healthy);
        assert_eq!(BmiCategory::from_bmi(value).label(), "Healthy range");
    }

    #[test]
    fn bmi_rejects_non_positive_inputs() {
        assert_eq!(bmi(0.0, 165.0), None);
        assert_eq!(bmi(65.0, 0.0), None);
        assert_eq!(bmi(-1.0, 165.0), None);
        assert_eq!(bmi(f64::NAN, 165.0), None);
        assert_eq!(bmi(65.0, f64::INFINITY), None);
    }

    #[test]
    fn category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Healthy);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }
}
