// Property tests: random edit sequences never break the partition.
// CI: 128 cases (default). Soak: PROPTEST_CASES=5000 cargo test --release

use proptest::prelude::*;
use theatre_grid_core::{Editor, Modifiers, ResizeTarget};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(128),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

#[derive(Clone, Debug)]
enum Op {
    Select { r1: usize, c1: usize, r2: usize, c2: usize },
    CtrlClick { row: usize, col: usize },
    Merge,
    Split { row: usize, col: usize },
    AddRow,
    AddColumn,
    DeleteRow(usize),
    DeleteColumn(usize),
    Copy,
    Cut,
    Paste { row: usize, col: usize },
    SetContent { row: usize, col: usize, text: String },
    ResizeColumn { col: usize, dx: f64 },
    Undo,
    Redo,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let idx = 0..6usize;
    prop_oneof![
        3 => (idx.clone(), idx.clone(), idx.clone(), idx.clone())
            .prop_map(|(r1, c1, r2, c2)| Op::Select { r1, c1, r2, c2 }),
        1 => (idx.clone(), idx.clone()).prop_map(|(row, col)| Op::CtrlClick { row, col }),
        3 => Just(Op::Merge),
        2 => (idx.clone(), idx.clone()).prop_map(|(row, col)| Op::Split { row, col }),
        1 => Just(Op::AddRow),
        1 => Just(Op::AddColumn),
        2 => idx.clone().prop_map(Op::DeleteRow),
        2 => idx.clone().prop_map(Op::DeleteColumn),
        1 => Just(Op::Copy),
        1 => Just(Op::Cut),
        2 => (idx.clone(), idx.clone()).prop_map(|(row, col)| Op::Paste { row, col }),
        1 => (idx.clone(), idx.clone(), r"[a-z{}]{0,8}")
            .prop_map(|(row, col, text)| Op::SetContent { row, col, text }),
        1 => (idx.clone(), -200.0..200.0f64).prop_map(|(col, dx)| Op::ResizeColumn { col, dx }),
        2 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

fn apply(editor: &mut Editor, op: Op) {
    let rows = editor.document().rows();
    let cols = editor.document().cols();
    let cell_id = |editor: &Editor, row: usize, col: usize| {
        editor
            .document()
            .cell_at_position(row % rows, col % cols)
            .map(|cell| cell.id)
    };
    match op {
        Op::Select { r1, c1, r2, c2 } => {
            editor.begin_drag(r1, c1);
            editor.drag_over(r2, c2);
            editor.end_drag();
        }
        Op::CtrlClick { row, col } => {
            if let Some(id) = cell_id(&*editor, row, col) {
                editor.click(id, Modifiers::CTRL);
            }
        }
        Op::Merge => {
            let _ = editor.merge_selection();
        }
        Op::Split { row, col } => {
            if let Some(id) = cell_id(&*editor, row, col) {
                let _ = editor.split(id);
            }
        }
        Op::AddRow => {
            editor.add_row();
        }
        Op::AddColumn => {
            editor.add_column();
        }
        Op::DeleteRow(row) => {
            let _ = editor.delete_row(row % rows);
        }
        Op::DeleteColumn(col) => {
            let _ = editor.delete_column(col % cols);
        }
        Op::Copy => {
            editor.copy_selection();
        }
        Op::Cut => {
            editor.cut_selection();
        }
        Op::Paste { row, col } => {
            if let Some(id) = cell_id(&*editor, row, col) {
                editor.paste(id);
            }
        }
        Op::SetContent { row, col, text } => {
            if let Some(id) = cell_id(&*editor, row, col) {
                let _ = editor.set_content(id, &text);
            }
        }
        Op::ResizeColumn { col, dx } => {
            if editor
                .begin_resize(ResizeTarget::Column(col % cols), (0.0, 0.0))
                .is_ok()
            {
                editor.resize_move((dx, 0.0));
                editor.pointer_up();
            }
        }
        Op::Undo => {
            editor.undo();
        }
        Op::Redo => {
            editor.redo();
        }
    }
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn edits_preserve_partition(ops in proptest::collection::vec(arb_op(), 1..40)) {
        let mut editor = Editor::new(4, 4).unwrap();
        for op in ops {
            apply(&mut editor, op);
            prop_assert_eq!(editor.document().validate(), Ok(()));
            let doc = editor.document();
            prop_assert_eq!(doc.column_widths().len(), doc.cols());
            prop_assert_eq!(doc.row_heights().len(), doc.rows());
            prop_assert!(doc.column_widths().iter().all(|&w| w >= 50));
            for id in editor.selection().selected() {
                prop_assert!(doc.cell(*id).is_some_and(|cell| cell.is_anchor()));
            }
        }
    }

    #[test]
    fn undo_to_start_restores_initial_document(ops in proptest::collection::vec(arb_op(), 1..25)) {
        let mut editor = Editor::new(3, 3).unwrap();
        let initial = editor.document().clone();
        for op in ops {
            if matches!(op, Op::Undo | Op::Redo) {
                continue;
            }
            apply(&mut editor, op);
        }
        while editor.undo() {}
        prop_assert_eq!(editor.document(), &initial);
    }
}
