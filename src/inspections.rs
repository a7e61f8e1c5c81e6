//! Registry of the available shell inspections.
//!
//! Inspections are identified by a closed enumeration. The registry only hands
//! out identities; the rules' detection logic lives with the analysis engine.

use globset::{Glob, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One static-analysis rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inspection {
    FixShebang,
    AddShebang,
    SimpleVarUsage,
    GlobalLocalVarDef,
    FunctionDef,
    WrapWordInString,
    ConvertSubshell,
    DuplicateFunctionDef,
    MissingIncludeFile,
    RecursiveIncludeFile,
    EvaluateExpansion,
    UnresolvedVariable,
    EvaluateArithmeticExpression,
    FloatArithmetic,
    ReadOnlyVariable,
    InternalVariable,
    UnknownFiledescriptor,
    UnusedFunctionParameter,
    ConvertBackquote,
    UnusedFunctionDef,
    SimpleArrayUse,
    InternalCommandFunctionOverride,
}

impl Inspection {
    /// Every inspection, in declaration order.
    pub const ALL: &'static [Inspection] = &[
        Inspection::FixShebang,
        Inspection::AddShebang,
        Inspection::SimpleVarUsage,
        Inspection::GlobalLocalVarDef,
        Inspection::FunctionDef,
        Inspection::WrapWordInString,
        Inspection::ConvertSubshell,
        Inspection::DuplicateFunctionDef,
        Inspection::MissingIncludeFile,
        Inspection::RecursiveIncludeFile,
        Inspection::EvaluateExpansion,
        Inspection::UnresolvedVariable,
        Inspection::EvaluateArithmeticExpression,
        Inspection::FloatArithmetic,
        Inspection::ReadOnlyVariable,
        Inspection::InternalVariable,
        Inspection::UnknownFiledescriptor,
        Inspection::UnusedFunctionParameter,
        Inspection::ConvertBackquote,
        Inspection::UnusedFunctionDef,
        Inspection::SimpleArrayUse,
        Inspection::InternalCommandFunctionOverride,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Inspection::FixShebang => "fix_shebang",
            Inspection::AddShebang => "add_shebang",
            Inspection::SimpleVarUsage => "simple_var_usage",
            Inspection::GlobalLocalVarDef => "global_local_var_def",
            Inspection::FunctionDef => "function_def",
            Inspection::WrapWordInString => "wrap_word_in_string",
            Inspection::ConvertSubshell => "convert_subshell",
            Inspection::DuplicateFunctionDef => "duplicate_function_def",
            Inspection::MissingIncludeFile => "missing_include_file",
            Inspection::RecursiveIncludeFile => "recursive_include_file",
            Inspection::EvaluateExpansion => "evaluate_expansion",
            Inspection::UnresolvedVariable => "unresolved_variable",
            Inspection::EvaluateArithmeticExpression => "evaluate_arithmetic_expression",
            Inspection::FloatArithmetic => "float_arithmetic",
            Inspection::ReadOnlyVariable => "read_only_variable",
            Inspection::InternalVariable => "internal_variable",
            Inspection::UnknownFiledescriptor => "unknown_filedescriptor",
            Inspection::UnusedFunctionParameter => "unused_function_parameter",
            Inspection::ConvertBackquote => "convert_backquote",
            Inspection::UnusedFunctionDef => "unused_function_def",
            Inspection::SimpleArrayUse => "simple_array_use",
            Inspection::InternalCommandFunctionOverride => "internal_command_function_override",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|i| i.as_str() == s)
    }

    /// Short human-readable summary.
    pub fn description(&self) -> &'static str {
        match self {
            Inspection::FixShebang => "Shebang line points to an unusual interpreter",
            Inspection::AddShebang => "Script has no shebang line",
            Inspection::SimpleVarUsage => "Variable use can be wrapped in braces",
            Inspection::GlobalLocalVarDef => "Local variable declared outside a function",
            Inspection::FunctionDef => "Function definition uses non-portable syntax",
            Inspection::WrapWordInString => "Unquoted word can be wrapped in a string",
            Inspection::ConvertSubshell => "Command substitution can be written with backquotes",
            Inspection::DuplicateFunctionDef => "Function is defined more than once",
            Inspection::MissingIncludeFile => "Sourced file does not exist",
            Inspection::RecursiveIncludeFile => "File sources itself",
            Inspection::EvaluateExpansion => "Static expansion can be evaluated",
            Inspection::UnresolvedVariable => "Variable is never defined",
            Inspection::EvaluateArithmeticExpression => "Constant arithmetic can be evaluated",
            Inspection::FloatArithmetic => "Floating point numbers in integer arithmetic",
            Inspection::ReadOnlyVariable => "Assignment to a read-only variable",
            Inspection::InternalVariable => "Assignment to a shell-internal variable",
            Inspection::UnknownFiledescriptor => "Redirection uses an unknown file descriptor",
            Inspection::UnusedFunctionParameter => "Function is called with unused parameters",
            Inspection::ConvertBackquote => "Backquote command substitution can use $(...)",
            Inspection::UnusedFunctionDef => "Function is never called",
            Inspection::SimpleArrayUse => "Array is used like a plain variable",
            Inspection::InternalCommandFunctionOverride => "Function shadows a builtin command",
        }
    }
}

impl std::fmt::Display for Inspection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Inspection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown inspection: {}", s))
    }
}

/// Supplies an ordered list of inspections to enable.
pub trait InspectionProvider: Send + Sync {
    fn inspections(&self) -> &'static [Inspection];
}

/// Inspections the test harness may exercise when tests enable them.
const TEST_HARNESS_INSPECTIONS: &[Inspection] = Inspection::ALL;

/// The fixed list used by test harnesses.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestHarnessInspections;

impl InspectionProvider for TestHarnessInspections {
    fn inspections(&self) -> &'static [Inspection] {
        TEST_HARNESS_INSPECTIONS
    }
}

/// Project-level switches for inspections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InspectionSettings {
    /// Inspection ids or glob patterns (e.g. `convert_*`) to turn off.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl InspectionSettings {
    /// Whether `inspection` is switched off.
    ///
    /// Invalid glob patterns only match their literal text.
    pub fn is_disabled(&self, inspection: Inspection) -> bool {
        if self.disabled.is_empty() {
            return false;
        }

        let id = inspection.as_str();
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.disabled {
            if let Ok(glob) = Glob::new(pattern) {
                builder.add(glob);
            } else if pattern == id {
                return true;
            }
        }

        match builder.build() {
            Ok(set) => set.is_match(id),
            Err(_) => self.disabled.iter().any(|p| p == id),
        }
    }
}

/// Who is asking for the inspection set.
#[derive(Debug, Clone, Copy)]
pub enum InspectionContext<'a> {
    /// A test or verification harness: the complete fixed list.
    TestHarness,
    /// A project run: the fixed list minus anything the settings disable.
    Project(&'a InspectionSettings),
}

/// Inspections to enable for `context`, in registry order.
pub fn enabled_inspections(context: InspectionContext<'_>) -> Vec<Inspection> {
    let all = TestHarnessInspections.inspections();
    match context {
        InspectionContext::TestHarness => all.to_vec(),
        InspectionContext::Project(settings) => all
            .iter()
            .copied()
            .filter(|i| !settings.is_disabled(*i))
            .collect(),
    }
}

/// Inspections listed more than once, in first-repeat order.
///
/// Registries are not deduplicated; this exists for callers assembling their
/// own lists.
pub fn duplicate_inspections(list: &[Inspection]) -> Vec<Inspection> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for inspection in list {
        if !seen.insert(*inspection) && !duplicates.contains(inspection) {
            duplicates.push(*inspection);
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_list_is_total_and_stable() {
        let first = enabled_inspections(InspectionContext::TestHarness);
        let second = enabled_inspections(InspectionContext::TestHarness);
        assert_eq!(first, second);
        assert_eq!(first.len(), 22);
        assert_eq!(first.first(), Some(&Inspection::FixShebang));
        assert_eq!(first.last(), Some(&Inspection::InternalCommandFunctionOverride));
    }

    #[test]
    fn test_harness_list_has_no_duplicates() {
        assert!(duplicate_inspections(TestHarnessInspections.inspections()).is_empty());
    }

    #[test]
    fn test_harness_list_matches_declaration_order() {
        assert_eq!(TestHarnessInspections.inspections(), Inspection::ALL);
    }

    #[test]
    fn test_id_round_trip() {
        for inspection in Inspection::ALL {
            assert_eq!(Inspection::parse(inspection.as_str()), Some(*inspection));
        }
        assert_eq!(Inspection::parse("no_such_rule"), None);
        assert!("no_such_rule".parse::<Inspection>().is_err());
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Inspection::ReadOnlyVariable).unwrap();
        assert_eq!(json, "\"read_only_variable\"");
    }

    #[test]
    fn test_project_context_filters_in_order() {
        let settings = InspectionSettings {
            disabled: vec!["convert_*".to_string(), "float_arithmetic".to_string()],
        };
        let enabled = enabled_inspections(InspectionContext::Project(&settings));

        assert_eq!(enabled.len(), 19);
        assert!(!enabled.contains(&Inspection::ConvertSubshell));
        assert!(!enabled.contains(&Inspection::ConvertBackquote));
        assert!(!enabled.contains(&Inspection::FloatArithmetic));

        let expected: Vec<_> = TestHarnessInspections
            .inspections()
            .iter()
            .copied()
            .filter(|i| enabled.contains(i))
            .collect();
        assert_eq!(enabled, expected);
    }

    #[test]
    fn test_project_context_without_settings_is_total() {
        let settings = InspectionSettings::default();
        assert_eq!(
            enabled_inspections(InspectionContext::Project(&settings)),
            enabled_inspections(InspectionContext::TestHarness)
        );
    }

    #[test]
    fn test_invalid_glob_matches_literally() {
        let settings = InspectionSettings {
            disabled: vec!["[".to_string()],
        };
        assert!(!settings.is_disabled(Inspection::AddShebang));
    }

    #[test]
    fn test_duplicate_inspections() {
        let list = [
            Inspection::AddShebang,
            Inspection::FixShebang,
            Inspection::AddShebang,
            Inspection::AddShebang,
        ];
        assert_eq!(duplicate_inspections(&list), vec![Inspection::AddShebang]);
    }
}
