//! Wire types for the compile service

use serde::{Deserialize, Serialize};

/// A set of input and output variable names.
///
/// Used both as the body of a compile request and as the answer of the
/// options endpoint. Order is significant: it fixes the channel order of the
/// generated model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSelection {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl VariableSelection {
    pub fn new(inputs: Vec<String>, outputs: Vec<String>) -> Self {
        Self { inputs, outputs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wire_format() {
        let selection = VariableSelection::new(
            vec!["Current function [A]".to_string()],
            vec!["Voltage [V]".to_string(), "Time [s]".to_string()],
        );
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(
            json,
            r#"{"inputs":["Current function [A]"],"outputs":["Voltage [V]","Time [s]"]}"#
        );
    }

    #[test]
    fn test_options_response_parses() {
        let body = r#"{"inputs": ["a", "b"], "outputs": ["c"]}"#;
        let options: VariableSelection = serde_json::from_str(body).unwrap();
        assert_eq!(options.inputs, vec!["a", "b"]);
        assert_eq!(options.outputs, vec!["c"]);
    }
}
