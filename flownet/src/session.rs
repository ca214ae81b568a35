//! Edge value edits coming from free-text dialog fields.
//!
//! Parsing and validation run to completion before anything is written, so a
//! rejected edit never leaves a partial value on the edge.

use crate::error::{EditError, Field, GraphError, ValidationError};
use crate::model::{EdgeKey, EdgeValue};
use crate::Graph;
use tracing::{debug, warn};

fn parse_field(field: Field, input: &str) -> Result<i64, ValidationError> {
    input.trim().parse::<i64>().map_err(|_| ValidationError::Parse {
        field,
        input: input.to_string(),
    })
}

/// Parses both fields, then checks `>= 0` and `flow <= capacity` in that order.
pub fn parse_edge_value(flow_text: &str, capacity_text: &str) -> Result<EdgeValue, ValidationError> {
    let flow = parse_field(Field::Flow, flow_text)?;
    let capacity = parse_field(Field::Capacity, capacity_text)?;
    if flow < 0 || capacity < 0 {
        return Err(ValidationError::NegativeValue { flow, capacity });
    }
    let (flow, capacity) = (flow as u64, capacity as u64);
    if flow > capacity {
        return Err(ValidationError::FlowExceedsCapacity { flow, capacity });
    }
    Ok(EdgeValue { flow, capacity })
}

/// Validates the proposed pair and, on success only, stores it on `key`.
pub fn propose_edge_value(
    g: &mut Graph,
    key: EdgeKey,
    flow_text: &str,
    capacity_text: &str,
) -> Result<EdgeValue, EditError> {
    EdgeEditSession::open(g, key)?.commit(g, flow_text, capacity_text)
}

/// One edit of one edge: snapshot of the value shown in the dialog plus the
/// commit step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeEditSession {
    key: EdgeKey,
    current: EdgeValue,
}

impl EdgeEditSession {
    pub fn open(g: &Graph, key: EdgeKey) -> Result<Self, GraphError> {
        let current = g.get_edge(key).ok_or(GraphError::EdgeNotFound(key))?;
        Ok(EdgeEditSession { key, current })
    }

    pub fn key(&self) -> EdgeKey {
        self.key
    }

    pub fn current(&self) -> EdgeValue {
        self.current
    }

    /// Dialog prefill: current flow and capacity as text.
    pub fn prefill(&self) -> (String, String) {
        (self.current.flow.to_string(), self.current.capacity.to_string())
    }

    pub fn propose(&self, flow_text: &str, capacity_text: &str) -> Result<EdgeValue, ValidationError> {
        parse_edge_value(flow_text, capacity_text)
    }

    pub fn commit(self, g: &mut Graph, flow_text: &str, capacity_text: &str) -> Result<EdgeValue, EditError> {
        let value = match self.propose(flow_text, capacity_text) {
            Ok(v) => v,
            Err(e) => {
                warn!(edge = %self.key, error = %e, "edge edit rejected");
                return Err(e.into());
            }
        };
        g.set_edge_value(self.key, value)?;
        debug!(edge = %self.key, value = %value, "edge value set");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_order_and_rules() {
        assert_eq!(parse_edge_value("3", "5"), Ok(EdgeValue::new(3, 5)));
        assert_eq!(parse_edge_value(" 0 ", "\t0\n"), Ok(EdgeValue::new(0, 0)));
        assert_eq!(parse_edge_value("+2", "2"), Ok(EdgeValue::new(2, 2)));
        assert!(matches!(
            parse_edge_value("x", "-1"),
            Err(ValidationError::Parse { field: Field::Flow, .. })
        ));
        assert!(matches!(
            parse_edge_value("1", "1.5"),
            Err(ValidationError::Parse { field: Field::Capacity, .. })
        ));
        assert_eq!(
            parse_edge_value("4", "-1"),
            Err(ValidationError::NegativeValue { flow: 4, capacity: -1 })
        );
        // Negativity is checked before the ordering rule.
        assert!(matches!(parse_edge_value("-5", "-9"), Err(ValidationError::NegativeValue { .. })));
        assert!(matches!(parse_edge_value("", "1"), Err(ValidationError::Parse { .. })));
        assert!(matches!(
            parse_edge_value("99999999999999999999", "1"),
            Err(ValidationError::Parse { .. })
        ));
    }

    #[test]
    fn messages_name_the_rule() {
        let e = parse_edge_value("5", "3").unwrap_err();
        assert_eq!(e.user_message(), "Invalid: Current flow cannot exceed max flow");
        let e = parse_edge_value("-1", "3").unwrap_err();
        assert_eq!(e.to_string(), "Both values must be >= 0");
        let e = parse_edge_value("abc", "3").unwrap_err();
        assert_eq!(e.to_string(), "Current flow must be an integer, got \"abc\"");
    }

    #[test]
    fn prefill_shows_current_value() {
        let mut g = Graph::new();
        let a = g.add_node(0.0, 0.0).unwrap();
        let b = g.add_node(100.0, 0.0).unwrap();
        let k = g.add_edge(a, b).unwrap();
        g.set_edge_value(k, EdgeValue::new(2, 7)).unwrap();
        let s = EdgeEditSession::open(&g, k).unwrap();
        assert_eq!(s.prefill(), ("2".to_string(), "7".to_string()));
        assert_eq!(s.current(), EdgeValue::new(2, 7));
    }
}
