use crate::enums::InputField;
use crate::error::CoreError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Business days per month used to scale daily figures to monthly ones.
pub const WORKING_DAYS: u32 = 22;

/// The five slider positions of the revenue calculator.
///
/// Owned by the page shell and passed by value into the derivation engine.
/// Every field is expected to already lie inside its [`InputField`] domain;
/// use [`CalculatorInputs::clamped`] at the edge to guarantee that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInputs {
    /// Total incoming calls per day.
    pub daily_calls: u32,
    /// Percent of daily calls arriving outside business hours.
    pub after_hours_pct: Decimal,
    /// Percent of after-hours calls the agent answers.
    pub ai_answer_rate: Decimal,
    /// Percent of answered calls converted into a booked appointment.
    pub conversion_rate: Decimal,
    /// Revenue per booked appointment, in currency units.
    pub avg_value: Decimal,
}

impl CalculatorInputs {
    pub fn new(
        daily_calls: u32,
        after_hours_pct: Decimal,
        ai_answer_rate: Decimal,
        conversion_rate: Decimal,
        avg_value: Decimal,
    ) -> Self {
        Self {
            daily_calls,
            after_hours_pct,
            ai_answer_rate,
            conversion_rate,
            avg_value,
        }
    }

    /// Reads a single field as a decimal.
    pub fn get(&self, field: InputField) -> Decimal {
        match field {
            InputField::DailyCalls => Decimal::from(self.daily_calls),
            InputField::AfterHoursPct => self.after_hours_pct,
            InputField::AiAnswerRate => self.ai_answer_rate,
            InputField::ConversionRate => self.conversion_rate,
            InputField::AvgValue => self.avg_value,
        }
    }

    /// Returns a copy with `field` set to `value`, clamped into the field's domain.
    pub fn with_field(mut self, field: InputField, value: Decimal) -> Self {
        let value = field.clamp(value);
        match field {
            // Clamped to [0, 300] and rounded, so the conversion cannot fail.
            InputField::DailyCalls => self.daily_calls = value.to_u32().unwrap_or_default(),
            InputField::AfterHoursPct => self.after_hours_pct = value,
            InputField::AiAnswerRate => self.ai_answer_rate = value,
            InputField::ConversionRate => self.conversion_rate = value,
            InputField::AvgValue => self.avg_value = value,
        }
        self
    }

    /// Returns a copy with every field clamped into its domain.
    pub fn clamped(self) -> Self {
        InputField::ALL
            .into_iter()
            .fold(self, |inputs, field| inputs.with_field(field, inputs.get(field)))
    }

    /// Checks every field against its domain without modifying anything.
    pub fn validate(&self) -> Result<(), CoreError> {
        for field in InputField::ALL {
            let value = self.get(field);
            if !field.contains(value) {
                return Err(CoreError::InvalidInput(
                    field.to_string(),
                    format!("{} is outside [{}, {}]", value, field.min(), field.max()),
                ));
            }
        }
        Ok(())
    }
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            daily_calls: 60,
            after_hours_pct: dec!(30),
            ai_answer_rate: dec!(80),
            conversion_rate: dec!(8),
            avg_value: dec!(120),
        }
    }
}

/// A snapshot of everything the calculator derives from one set of inputs.
///
/// Recreated whole on every input change; never partially updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// After-hours calls per day, 0 decimal places.
    pub after_hours_calls: Decimal,
    /// Calls per day answered by the agent, 0 decimal places.
    pub ai_answered: Decimal,
    /// Extra appointments per day, 2 decimal places.
    pub additional_appointments_daily: Decimal,
    /// Extra appointments per month, 1 decimal place.
    pub additional_appointments_monthly: Decimal,
    /// Extra revenue per month, 2 decimal places.
    pub monthly_revenue_increase: Decimal,
}

impl DerivedMetrics {
    /// A snapshot where every metric is zero.
    pub fn zero() -> Self {
        Self {
            after_hours_calls: Decimal::ZERO,
            ai_answered: Decimal::ZERO,
            additional_appointments_daily: Decimal::ZERO,
            additional_appointments_monthly: Decimal::ZERO,
            monthly_revenue_increase: Decimal::ZERO,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.after_hours_calls.is_zero()
            && self.ai_answered.is_zero()
            && self.additional_appointments_daily.is_zero()
            && self.additional_appointments_monthly.is_zero()
            && self.monthly_revenue_increase.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inputs_match_field_defaults() {
        let inputs = CalculatorInputs::default();
        for field in InputField::ALL {
            assert_eq!(inputs.get(field), field.default_value());
        }
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn clamped_brings_every_field_into_range() {
        let wild = CalculatorInputs::new(999, dec!(-3), dec!(250), dec!(101), dec!(1));
        let clamped = wild.clamped();

        assert_eq!(clamped, CalculatorInputs::new(300, dec!(0), dec!(100), dec!(100), dec!(10)));
        assert!(clamped.validate().is_ok());
    }

    #[test]
    fn validate_names_the_offending_field() {
        let inputs = CalculatorInputs {
            avg_value: dec!(5),
            ..CalculatorInputs::default()
        };
        match inputs.validate() {
            Err(CoreError::InvalidInput(field, _)) => assert_eq!(field, "avgValue"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn with_field_updates_only_that_field() {
        let inputs = CalculatorInputs::default().with_field(InputField::ConversionRate, dec!(12.5));
        assert_eq!(inputs.conversion_rate, dec!(12.5));
        assert_eq!(inputs.daily_calls, 60);
        assert_eq!(inputs.avg_value, dec!(120));
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let json = serde_json::to_value(CalculatorInputs::default()).unwrap();
        assert_eq!(json["dailyCalls"], 60);
        assert!(json.get("afterHoursPct").is_some());

        let metrics = serde_json::to_value(DerivedMetrics::zero()).unwrap();
        assert!(metrics.get("monthlyRevenueIncrease").is_some());
    }

    #[test]
    fn accepts_numbers_for_decimal_fields() {
        let inputs: CalculatorInputs = serde_json::from_str(
            r#"{"dailyCalls":100,"afterHoursPct":25,"aiAnswerRate":90.5,"conversionRate":"10","avgValue":200}"#,
        )
        .unwrap();
        assert_eq!(inputs.ai_answer_rate, dec!(90.5));
        assert_eq!(inputs.conversion_rate, dec!(10));
    }
}
