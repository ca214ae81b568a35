use flownet::geometry::tolerance::PLACEMENT_CATCH_SQ;
use flownet::{ConnectState, EdgeKey, Editor, Graph, NodeId, PointerButton, Selection};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Primary { x: i16, y: i16 },
    ClickNode { idx: u16 },
    Drag { idx: u16, dx: i8, dy: i8 },
    PickEdge { x: i16, y: i16 },
    EditSelected { flow: i8, capacity: i8 },
    DeleteSelected,
    RemoveEdge { idx: u16 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::Primary { x, y }),
        any::<u16>().prop_map(|idx| Op::ClickNode { idx }),
        (any::<u16>(), any::<i8>(), any::<i8>()).prop_map(|(idx, dx, dy)| Op::Drag { idx, dx, dy }),
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::PickEdge { x, y }),
        (any::<i8>(), any::<i8>()).prop_map(|(flow, capacity)| Op::EditSelected { flow, capacity }),
        Just(Op::DeleteSelected),
        any::<u16>().prop_map(|idx| Op::RemoveEdge { idx }),
    ]
}

#[derive(Default)]
struct ModelState {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeKey>,
}

fn sync_state(g: &Graph, state: &mut ModelState) {
    state.nodes = g.get_node_arrays().ids.into_iter().map(NodeId).collect();
    state.edges = g.edges().map(|(k, _)| k).collect();
}

fn apply_op(ed: &mut Editor, state: &ModelState, op: Op) {
    match op {
        Op::Primary { x, y } => {
            let _ = ed.pointer_down(PointerButton::Primary, x as f64 * 0.05, y as f64 * 0.05);
        }
        Op::ClickNode { idx } => {
            if state.nodes.is_empty() {
                return;
            }
            let nid = state.nodes[(idx as usize) % state.nodes.len()];
            if let Some(n) = ed.graph().get_node(nid) {
                let _ = ed.pointer_down(PointerButton::Primary, n.x, n.y);
            }
        }
        Op::Drag { idx, dx, dy } => {
            if state.nodes.is_empty() {
                return;
            }
            let nid = state.nodes[(idx as usize) % state.nodes.len()];
            if let Some(n) = ed.graph().get_node(nid) {
                let _ = ed.pointer_down(PointerButton::Secondary, n.x, n.y);
                ed.pointer_move(n.x + dx as f64, n.y + dy as f64);
                ed.pointer_up();
            }
        }
        Op::PickEdge { x, y } => {
            let _ = ed.pointer_down(PointerButton::Secondary, x as f64 * 0.05, y as f64 * 0.05);
            ed.pointer_up();
        }
        Op::EditSelected { flow, capacity } => {
            if let Selection::Edge(k) = ed.selection() {
                let _ = ed.apply_edge_edit(k, &flow.to_string(), &capacity.to_string());
            }
        }
        Op::DeleteSelected => {
            let _ = ed.delete_selected_confirmed();
        }
        Op::RemoveEdge { idx } => {
            if state.edges.is_empty() {
                return;
            }
            let key = state.edges[(idx as usize) % state.edges.len()];
            let mut g = ed.graph().clone();
            g.remove_edge(key).unwrap();
            ed.replace_graph(g);
        }
    }
}

fn assert_invariants(g: &Graph) {
    // No dangling references and no self-loops
    for (k, v) in g.edges() {
        assert!(g.get_node(k.source).is_some(), "edge {} missing source", k);
        assert!(g.get_node(k.target).is_some(), "edge {} missing target", k);
        assert_ne!(k.source, k.target, "edge {} is a self-loop", k);
        assert!(v.flow <= v.capacity, "edge {} holds {}", k, v);
    }

    // Arrays agree with the model
    let na = g.get_node_arrays();
    assert_eq!(na.ids.len(), g.node_count());
    assert_eq!(na.positions.len(), 2 * g.node_count());
    let ea = g.get_edge_arrays();
    assert_eq!(ea.endpoints.len(), 2 * g.edge_count());
    assert_eq!(ea.flows.len(), ea.capacities.len());

    // An armed node is always live
    if let ConnectState::Armed(id) = g.connect_state() {
        assert!(g.get_node(id).is_some(), "armed node {} was removed", id);
    }

    // Round trip through the document format
    let back = Graph::from_json_value(g.to_json_value()).expect("own documents load");
    assert_eq!(&back, g);
}

fn assert_spacing(g: &Graph) {
    // Clicks only place nodes outside the catch radius; drags may overlap,
    // so this only holds for sequences without drags.
    let pts: Vec<_> = g.nodes().map(|(_, n)| n).collect();
    for (i, a) in pts.iter().enumerate() {
        for b in &pts[i + 1..] {
            let d2 = (a.x - b.x).powi(2) + (a.y - b.y).powi(2);
            assert!(d2 >= PLACEMENT_CATCH_SQ, "nodes at {:?} and {:?} too close", a, b);
        }
    }
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 5..40)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 2_000, .. ProptestConfig::default() })]
    #[test]
    fn editor_invariants(seq in sequence_strategy()) {
        let mut editor = Editor::new();
        let mut state = ModelState::default();
        for op in seq {
            sync_state(editor.graph(), &mut state);
            apply_op(&mut editor, &state, op);
            assert_invariants(editor.graph());
        }
    }

    #[test]
    fn placement_keeps_nodes_apart(seq in prop::collection::vec((any::<i16>(), any::<i16>()), 1..60)) {
        let mut editor = Editor::new();
        for (x, y) in seq {
            let _ = editor.pointer_down(PointerButton::Primary, x as f64 * 0.05, y as f64 * 0.05);
        }
        assert_spacing(editor.graph());
    }
}
