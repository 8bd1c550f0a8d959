use pretty_assertions::assert_eq;

use super::*;

#[test]
fn builds_bottom_up_with_parents() {
    let mut arena = ExprArena::new();
    let one = arena.num(1.0);
    let two = arena.num(2.0);
    let sum = arena.binary(BinaryOp::Add, one, two);

    assert_eq!(arena.len(), 3);
    assert_eq!(arena.parent(one), Some(sum));
    assert_eq!(arena.parent(two), Some(sum));
    assert_eq!(arena.parent(sum), None);
    assert_eq!(
        arena.kind(sum),
        ExprKind::Binary {
            op: BinaryOp::Add,
            left: one,
            right: two
        }
    );
}

#[test]
fn composite_span_covers_children() {
    let mut arena = ExprArena::new();
    let a = arena.ident("a");
    let b = arena.ident("b");
    let or = arena.logical(LogicalOp::Or, a, b);
    let span = arena.span(or);
    assert_eq!(span.start, arena.span(a).start);
    assert_eq!(span.end, arena.span(b).end);
}

#[test]
fn later_nodes_start_after_earlier_ones() {
    let mut arena = ExprArena::new();
    let init = arena.num(1.0);
    let decl = arena.declaration("x", init);
    let reference = arena.ident("x");
    assert!(arena.span(reference).start >= arena.span(decl).end);
}

#[test]
fn explicit_spans_advance_cursor() {
    let mut arena = ExprArena::new();
    arena.alloc(ExprKind::Null, Span::new(100, 104));
    let next = arena.null();
    assert!(arena.span(next).start > 104);
}

#[test]
fn callee_detection() {
    let mut arena = ExprArena::new();
    let math = arena.ident("Math");
    let floor = arena.member(math, "floor");
    let arg = arena.num(1.5);
    let call = arena.call(floor, &[arg]);

    assert!(arena.is_callee(floor));
    assert!(!arena.is_callee(arg));
    assert!(!arena.is_callee(call));
    assert!(!arena.is_callee(math));
}

#[test]
fn child_lists() {
    let mut arena = ExprArena::new();
    let a = arena.num(1.0);
    let b = arena.num(2.0);
    let arr = arena.array(&[a, b]);
    let ExprKind::Array(range) = arena.kind(arr) else {
        panic!("expected array");
    };
    assert_eq!(arena.expr_list(range), &[a, b]);
    assert_eq!(arena.expr_list(ExprRange::EMPTY), &[] as &[ExprId]);
}

#[test]
fn template_segments() {
    let mut arena = ExprArena::new();
    let x = arena.num(1.0);
    let tpl = arena.template(&[(Some("a"), "a"), (None, "\\u{")], &[x]);
    let ExprKind::Template { quasis, exprs } = arena.kind(tpl) else {
        panic!("expected template");
    };
    let segments = arena.quasis(quasis);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].cooked, None);
    assert_eq!(arena.name(segments[1].raw), "\\u{");
    assert_eq!(arena.expr_list(exprs), &[x]);
    assert_eq!(arena.parent(x), Some(tpl));
}

#[test]
fn out_of_range_ids_are_opaque() {
    let arena = ExprArena::new();
    assert_eq!(arena.kind(ExprId::new(5)), ExprKind::Opaque);
    assert_eq!(arena.span(ExprId::INVALID), Span::DUMMY);
}
