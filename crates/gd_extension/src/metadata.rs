//! Metadata describing what an extension contributes to the engine
//!
//! Everything here is static description consumed by the host: the editor
//! shows names, sentences and icons, the event compiler reads parameter
//! types and the code binding (function name and include file).

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::ExtensionError;

/// General information about an extension
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ExtensionInfo {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub author: String,
    pub license: String,
}

/// Type tag of an instruction or expression parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterType {
    /// A single object of the type given in the extra info
    Object,
    /// A list of objects (optionally restricted to a type)
    ObjectList,
    /// A numeric expression
    Expression,
    String,
    /// A color, as "R;G;B"
    Color,
    /// Modification operator (=, +, -, *, /)
    Operator,
    /// Comparison operator (=, <, >, <=, >=, !=)
    RelationalOperator,
    /// Whether the condition is inverted, filled by the event compiler
    ConditionInverted,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::Object => "object",
            ParameterType::ObjectList => "objectList",
            ParameterType::Expression => "expression",
            ParameterType::String => "string",
            ParameterType::Color => "color",
            ParameterType::Operator => "operator",
            ParameterType::RelationalOperator => "relationalOperator",
            ParameterType::ConditionInverted => "conditionInverted",
        }
    }

    /// Check if this parameter designates objects
    pub fn is_object(&self) -> bool {
        matches!(self, ParameterType::Object | ParameterType::ObjectList)
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "object" => ParameterType::Object,
            "objectList" => ParameterType::ObjectList,
            "expression" => ParameterType::Expression,
            "string" => ParameterType::String,
            "color" => ParameterType::Color,
            "operator" => ParameterType::Operator,
            "relationalOperator" => ParameterType::RelationalOperator,
            "conditionInverted" => ParameterType::ConditionInverted,
            other => {
                return Err(ExtensionError::ParseError(format!(
                    "unknown parameter type '{other}'"
                )))
            }
        })
    }
}

/// A single parameter of an instruction or expression
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParameterMetadata {
    #[serde(rename = "type")]
    pub kind: ParameterType,
    pub description: String,
    /// Additional information, e.g. the object type for object parameters
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extra_info: String,
    pub optional: bool,
    /// Hidden from the editor, filled by the event compiler
    pub code_only: bool,
}

/// How the event compiler calls the implementation
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CodeInfo {
    pub function_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub include_file: String,
    /// Set for instructions reading or modifying a value ("number", "string")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manipulated_type: Option<String>,
    /// Getter used by modification actions to read the current value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_getter: Option<String>,
}

/// How prominently the editor lists an instruction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Normal,
    Simple,
    Advanced,
}

/// An action or a condition
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InstructionMetadata {
    pub name: String,
    pub full_name: String,
    pub description: String,
    /// Sentence shown in the event sheet, with `_PARAMn_` placeholders
    pub sentence: String,
    pub group: String,
    pub icon: String,
    pub small_icon: String,
    pub parameters: Vec<ParameterMetadata>,
    pub visibility: Visibility,
    pub code: CodeInfo,
}

impl InstructionMetadata {
    pub fn new(
        name: &str,
        full_name: &str,
        description: &str,
        sentence: &str,
        group: &str,
        icon: &str,
        small_icon: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            full_name: full_name.to_string(),
            description: description.to_string(),
            sentence: sentence.to_string(),
            group: group.to_string(),
            icon: icon.to_string(),
            small_icon: small_icon.to_string(),
            parameters: Vec::new(),
            visibility: Visibility::Normal,
            code: CodeInfo::default(),
        }
    }

    /// Add a parameter shown in the editor
    pub fn add_parameter(
        &mut self,
        kind: ParameterType,
        description: &str,
        extra_info: &str,
        optional: bool,
    ) -> &mut Self {
        self.parameters.push(ParameterMetadata {
            kind,
            description: description.to_string(),
            extra_info: extra_info.to_string(),
            optional,
            code_only: false,
        });
        self
    }

    /// Add a parameter filled by the event compiler only
    pub fn add_code_only_parameter(&mut self, kind: ParameterType, extra_info: &str) -> &mut Self {
        self.parameters.push(ParameterMetadata {
            kind,
            description: String::new(),
            extra_info: extra_info.to_string(),
            optional: false,
            code_only: true,
        });
        self
    }

    pub fn mark_as_simple(&mut self) -> &mut Self {
        self.visibility = Visibility::Simple;
        self
    }

    pub fn mark_as_advanced(&mut self) -> &mut Self {
        self.visibility = Visibility::Advanced;
        self
    }

    pub fn set_function_name(&mut self, function_name: &str) -> &mut Self {
        self.code.function_name = function_name.to_string();
        self
    }

    pub fn set_include_file(&mut self, include_file: &str) -> &mut Self {
        self.code.include_file = include_file.to_string();
        self
    }

    pub fn set_manipulated_type(&mut self, manipulated_type: &str) -> &mut Self {
        self.code.manipulated_type = Some(manipulated_type.to_string());
        self
    }

    pub fn set_associated_getter(&mut self, getter: &str) -> &mut Self {
        self.code.associated_getter = Some(getter.to_string());
        self
    }

    /// Check whether the event compiler passes the inverted flag
    pub fn is_invertible(&self) -> bool {
        self.parameters
            .iter()
            .any(|p| p.kind == ParameterType::ConditionInverted)
    }

    /// Number of parameters shown in the editor
    pub fn visible_parameter_count(&self) -> usize {
        self.parameters.iter().filter(|p| !p.code_only).count()
    }
}

/// A numeric expression usable in event formulas
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExpressionMetadata {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub group: String,
    pub small_icon: String,
    pub parameters: Vec<ParameterMetadata>,
    pub code: CodeInfo,
}

impl ExpressionMetadata {
    pub fn new(name: &str, full_name: &str, description: &str, group: &str, small_icon: &str) -> Self {
        Self {
            name: name.to_string(),
            full_name: full_name.to_string(),
            description: description.to_string(),
            group: group.to_string(),
            small_icon: small_icon.to_string(),
            parameters: Vec::new(),
            code: CodeInfo::default(),
        }
    }

    pub fn add_parameter(
        &mut self,
        kind: ParameterType,
        description: &str,
        extra_info: &str,
        optional: bool,
    ) -> &mut Self {
        self.parameters.push(ParameterMetadata {
            kind,
            description: description.to_string(),
            extra_info: extra_info.to_string(),
            optional,
            code_only: false,
        });
        self
    }

    pub fn set_function_name(&mut self, function_name: &str) -> &mut Self {
        self.code.function_name = function_name.to_string();
        self
    }

    pub fn set_include_file(&mut self, include_file: &str) -> &mut Self {
        self.code.include_file = include_file.to_string();
        self
    }
}

/// An object type and the instructions scoped to it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ObjectMetadata {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub icon: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub include_file: String,
    pub conditions: Vec<InstructionMetadata>,
    pub actions: Vec<InstructionMetadata>,
    pub expressions: Vec<ExpressionMetadata>,
}

impl ObjectMetadata {
    pub fn new(name: &str, full_name: &str, description: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            full_name: full_name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            include_file: String::new(),
            conditions: Vec::new(),
            actions: Vec::new(),
            expressions: Vec::new(),
        }
    }

    pub fn set_include_file(&mut self, include_file: &str) -> &mut Self {
        self.include_file = include_file.to_string();
        self
    }

    pub fn add_condition(
        &mut self,
        name: &str,
        full_name: &str,
        description: &str,
        sentence: &str,
        group: &str,
        icon: &str,
        small_icon: &str,
    ) -> &mut InstructionMetadata {
        self.conditions.push(InstructionMetadata::new(
            name,
            full_name,
            description,
            sentence,
            group,
            icon,
            small_icon,
        ));
        let last = self.conditions.len() - 1;
        &mut self.conditions[last]
    }

    pub fn add_action(
        &mut self,
        name: &str,
        full_name: &str,
        description: &str,
        sentence: &str,
        group: &str,
        icon: &str,
        small_icon: &str,
    ) -> &mut InstructionMetadata {
        self.actions.push(InstructionMetadata::new(
            name,
            full_name,
            description,
            sentence,
            group,
            icon,
            small_icon,
        ));
        let last = self.actions.len() - 1;
        &mut self.actions[last]
    }

    pub fn add_expression(
        &mut self,
        name: &str,
        full_name: &str,
        description: &str,
        group: &str,
        small_icon: &str,
    ) -> &mut ExpressionMetadata {
        self.expressions.push(ExpressionMetadata::new(
            name,
            full_name,
            description,
            group,
            small_icon,
        ));
        let last = self.expressions.len() - 1;
        &mut self.expressions[last]
    }

    pub fn condition(&self, name: &str) -> Option<&InstructionMetadata> {
        self.conditions.iter().find(|c| c.name == name)
    }

    pub fn action(&self, name: &str) -> Option<&InstructionMetadata> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn expression(&self, name: &str) -> Option<&ExpressionMetadata> {
        self.expressions.iter().find(|e| e.name == name)
    }
}
