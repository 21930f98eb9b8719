//! Consistency checks run before an extension is accepted

use std::collections::HashSet;

use crate::extension::{PlatformExtension, NAMESPACE_SEPARATOR};
use crate::metadata::{ExpressionMetadata, InstructionMetadata, ParameterType};
use crate::ExtensionError;

/// Validate that an extension declaration is internally consistent
pub fn validate_extension(extension: &PlatformExtension) -> Result<(), ExtensionError> {
    let name = extension.name();
    if name.is_empty() {
        return Err(ExtensionError::ValidationError(
            "extension has no name".to_string(),
        ));
    }
    if name.contains(NAMESPACE_SEPARATOR) {
        return Err(ExtensionError::ValidationError(format!(
            "extension name '{name}' must not contain '{NAMESPACE_SEPARATOR}'"
        )));
    }

    unique_names(name, "object", extension.objects.iter().map(|o| o.name.as_str()))?;
    validate_instructions(name, "condition", &extension.conditions, None)?;
    validate_instructions(name, "action", &extension.actions, None)?;
    validate_expressions(name, &extension.expressions)?;

    for object in &extension.objects {
        let scope = format!("{name}{NAMESPACE_SEPARATOR}{}", object.name);
        validate_instructions(&scope, "condition", &object.conditions, Some(&object.name))?;
        validate_instructions(&scope, "action", &object.actions, Some(&object.name))?;
        validate_expressions(&scope, &object.expressions)?;
    }

    for binding in &extension.runtime_objects {
        if extension.object(&binding.object_name).is_none() {
            return Err(ExtensionError::ValidationError(format!(
                "{name}: runtime object '{}' is bound to undeclared object '{}'",
                binding.runtime_name, binding.object_name
            )));
        }
    }

    Ok(())
}

fn unique_names<'a>(
    scope: &str,
    kind: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), ExtensionError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(ExtensionError::ValidationError(format!(
                "{scope}: {kind} with an empty name"
            )));
        }
        if !seen.insert(name) {
            return Err(ExtensionError::ValidationError(format!(
                "{scope}: {kind} '{name}' is declared twice"
            )));
        }
    }
    Ok(())
}

fn validate_instructions(
    scope: &str,
    kind: &str,
    instructions: &[InstructionMetadata],
    object: Option<&str>,
) -> Result<(), ExtensionError> {
    unique_names(scope, kind, instructions.iter().map(|i| i.name.as_str()))?;

    for instruction in instructions {
        let context = format!("{scope}: {kind} '{}'", instruction.name);

        if instruction.code.function_name.is_empty() {
            return Err(ExtensionError::ValidationError(format!(
                "{context} has no function name"
            )));
        }

        for index in sentence_placeholders(&instruction.sentence) {
            if index >= instruction.parameters.len() {
                return Err(ExtensionError::ValidationError(format!(
                    "{context} references _PARAM{index}_ but has {} parameters",
                    instruction.parameters.len()
                )));
            }
        }

        // Object instructions receive the object as first parameter
        if let Some(object) = object {
            let first = instruction.parameters.first();
            let ok = first.is_some_and(|p| p.kind.is_object() && p.extra_info == object);
            if !ok {
                return Err(ExtensionError::ValidationError(format!(
                    "{context} must take a '{object}' object as first parameter"
                )));
            }
        }
    }
    Ok(())
}

fn validate_expressions(scope: &str, expressions: &[ExpressionMetadata]) -> Result<(), ExtensionError> {
    unique_names(scope, "expression", expressions.iter().map(|e| e.name.as_str()))?;

    for expression in expressions {
        if expression.code.function_name.is_empty() {
            return Err(ExtensionError::ValidationError(format!(
                "{scope}: expression '{}' has no function name",
                expression.name
            )));
        }
        if expression
            .parameters
            .iter()
            .any(|p| p.kind == ParameterType::ConditionInverted)
        {
            return Err(ExtensionError::ValidationError(format!(
                "{scope}: expression '{}' cannot take a conditionInverted parameter",
                expression.name
            )));
        }
    }
    Ok(())
}

/// Parameter indices referenced by `_PARAMn_` placeholders in a sentence
pub fn sentence_placeholders(sentence: &str) -> Vec<usize> {
    const PREFIX: &str = "_PARAM";

    let mut indices = Vec::new();
    let mut rest = sentence;
    while let Some(start) = rest.find(PREFIX) {
        let after = &rest[start + PREFIX.len()..];
        let digits = after.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 && after[digits..].starts_with('_') {
            if let Ok(index) = after[..digits].parse() {
                indices.push(index);
            }
            rest = &after[digits + 1..];
        } else {
            rest = after;
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extension() -> PlatformExtension {
        let mut ext = PlatformExtension::new();
        ext.set_extension_information("Test", "Test", "", "", "");
        ext
    }

    #[test]
    fn placeholders_are_parsed() {
        assert_eq!(
            sentence_placeholders("The width of _PARAM0_ is _PARAM1__PARAM2_"),
            vec![0, 1, 2]
        );
        assert_eq!(
            sentence_placeholders("_PARAM4_ is in collision with the tile at _PARAM2_;_PARAM3_"),
            vec![4, 2, 3]
        );
        assert_eq!(sentence_placeholders("_PARAM_ and _PARAMx_"), Vec::<usize>::new());
        assert_eq!(sentence_placeholders("_PARAM12_"), vec![12]);
    }

    #[test]
    fn valid_extension_passes() {
        let mut ext = extension();
        ext.add_condition("Check", "Check", "", "_PARAM0_ is ok", "", "", "")
            .add_parameter(ParameterType::ObjectList, "Object", "", false)
            .set_function_name("Check");
        assert!(validate_extension(&ext).is_ok());
    }

    #[test]
    fn placeholder_out_of_range_fails() {
        let mut ext = extension();
        ext.add_condition("Check", "Check", "", "_PARAM0_ vs _PARAM1_", "", "", "")
            .add_parameter(ParameterType::ObjectList, "Object", "", false)
            .set_function_name("Check");
        let err = validate_extension(&ext).unwrap_err();
        assert!(err.to_string().contains("_PARAM1_"));
    }

    #[test]
    fn missing_function_name_fails() {
        let mut ext = extension();
        ext.add_action("Do", "Do", "", "Do it", "", "", "");
        assert!(validate_extension(&ext).is_err());
    }

    #[test]
    fn duplicate_names_fail() {
        let mut ext = extension();
        ext.add_object("Box", "Box", "", "");
        ext.add_object("Box", "Box", "", "");
        assert!(validate_extension(&ext).is_err());
    }

    #[test]
    fn object_instruction_needs_object_parameter() {
        let mut ext = extension();
        ext.add_object("Box", "Box", "", "")
            .add_action("Grow", "Grow", "", "Grow _PARAM0_", "", "", "")
            .add_parameter(ParameterType::Object, "Object", "Circle", false)
            .set_function_name("Grow");
        assert!(validate_extension(&ext).is_err());

        ext.objects[0].actions[0].parameters[0].extra_info = "Box".to_string();
        assert!(validate_extension(&ext).is_ok());
    }

    #[test]
    fn namespaced_extension_name_fails() {
        let mut ext = extension();
        ext.info.name = "A::B".to_string();
        assert!(validate_extension(&ext).is_err());
    }
}
