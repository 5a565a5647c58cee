use crate::ir::ValidationRule;

/// One-line description of a validation rule; `None` for rule kinds we can't describe.
pub fn describe(rule: &ValidationRule) -> Option<String> {
    let text = match rule {
        ValidationRule::ArrayMaxItems { max } => format!("Max array length: {max}"),
        ValidationRule::ArrayMinItems { min } => format!("Min array length: {min}"),
        ValidationRule::ArrayUniqueItems => "Values must be unique".to_string(),
        ValidationRule::NumberGreaterThan { value } => format!("Must be greater than {value}"),
        ValidationRule::NumberGreaterOrEqual { value } => {
            format!("Must be greater than or equal to {value}")
        }
        ValidationRule::NumberLessThan { value } => format!("Must be less than {value}"),
        ValidationRule::NumberLessOrEqual { value } => {
            format!("Must be less than or equal to {value}")
        }
        ValidationRule::NumberMultipleOf { value } => format!("Must be a multiple of {value}"),
        ValidationRule::StringMaxLength { length } => format!("Max length: {length}"),
        ValidationRule::StringMinLength { length } => format!("Min length: {length}"),
        ValidationRule::StringPattern { pattern } => format!("Must match pattern: {pattern}"),
        ValidationRule::Unknown => return None,
    };
    Some(text)
}

/// Nested bullets for `rules`, in declaration order.
pub fn bullets(rules: &[ValidationRule]) -> impl Iterator<Item = String> + '_ {
    rules.iter().filter_map(describe).map(|text| format!("  - {text}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_rule_has_a_bullet() {
        let cases = [
            (ValidationRule::ArrayMaxItems { max: 10.0 }, "Max array length: 10"),
            (ValidationRule::ArrayMinItems { min: 1.0 }, "Min array length: 1"),
            (ValidationRule::ArrayUniqueItems, "Values must be unique"),
            (ValidationRule::NumberGreaterThan { value: 0.0 }, "Must be greater than 0"),
            (
                ValidationRule::NumberGreaterOrEqual { value: 1.5 },
                "Must be greater than or equal to 1.5",
            ),
            (ValidationRule::NumberLessThan { value: 100.0 }, "Must be less than 100"),
            (ValidationRule::NumberLessOrEqual { value: -2.0 }, "Must be less than or equal to -2"),
            (ValidationRule::NumberMultipleOf { value: 0.25 }, "Must be a multiple of 0.25"),
            (ValidationRule::StringMaxLength { length: 64.0 }, "Max length: 64"),
            (ValidationRule::StringMinLength { length: 3.0 }, "Min length: 3"),
            (
                ValidationRule::StringPattern { pattern: "^[a-z]+$".into() },
                "Must match pattern: ^[a-z]+$",
            ),
        ];
        for (rule, expected) in cases {
            assert_eq!(describe(&rule).as_deref(), Some(expected));
        }
    }

    #[test]
    fn unknown_rules_are_omitted_and_order_is_kept() {
        let rules = [
            ValidationRule::StringMinLength { length: 1.0 },
            ValidationRule::Unknown,
            ValidationRule::ArrayUniqueItems,
        ];
        let lines: Vec<String> = bullets(&rules).collect();
        assert_eq!(lines, ["  - Min length: 1", "  - Values must be unique"]);
    }
}
