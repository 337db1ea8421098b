//! End-to-end buffer scenarios, mirroring how the teacher crate separates
//! cross-module scenario coverage into `tests/` (see
//! `examples/r3e-network-neo-rs/crates/io/tests/binary_writer_tests.rs`)
//! from inline per-file unit tests.

use simnet_buffer::{BufferView, ByteOrder};

#[test]
fn copy_on_write_growth_leaves_sibling_views_untouched() {
    // Buffer of capacity 10, initially empty.
    let mut v1 = BufferView::new(10);

    // Write [1, 2, 3] via addAtEnd.
    v1.grow_at_end(3).unwrap();
    let mut writer = v1.iter();
    writer.write_u8(1).unwrap();
    writer.write_u8(2).unwrap();
    writer.write_u8(3).unwrap();

    // fragment(0, 3) into v2.
    let v2 = v1.fragment(0, 3);

    // v1.addAtStart(2) writing [9, 8].
    v1.grow_at_start(2).unwrap();
    let mut writer = v1.iter();
    writer.write_u8(9).unwrap();
    writer.write_u8(8).unwrap();

    let mut v1_bytes = [0u8; 5];
    v1.iter().read_bytes(&mut v1_bytes).unwrap();
    assert_eq!(v1_bytes, [9, 8, 1, 2, 3]);

    let mut v2_bytes = [0u8; 3];
    v2.iter().read_bytes(&mut v2_bytes).unwrap();
    assert_eq!(v2_bytes, [1, 2, 3]);
}

// The zero-compressed read scenario (start=0, zero_start=2, zero_end=5,
// end=7) needs direct access to the view's offsets to fabricate that exact
// geometry, which the public API deliberately doesn't expose: growth only
// ever extends the two real segments. It lives as an inline test instead:
// `iterator::tests::zero_compressed_read_scenario_from_start_two_five_seven`.

#[test]
fn realise_is_idempotent() {
    let view = BufferView::zeroed(4);
    let once = view.realise();
    let twice = once.realise();
    assert!(twice.is_real());
    let mut a = [0u8; 4];
    let mut b = [0u8; 4];
    once.iter().read_bytes(&mut a).unwrap();
    twice.iter().read_bytes(&mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fragmenting_the_full_range_preserves_logical_bytes() {
    let mut view = BufferView::new(8);
    view.grow_at_end(4).unwrap();
    view.iter().write_bytes(&[1, 2, 3, 4]).unwrap();

    let fragment = view.fragment(0, view.size());
    let mut original = [0u8; 4];
    let mut copy = [0u8; 4];
    view.iter().read_bytes(&mut original).unwrap();
    fragment.iter().read_bytes(&mut copy).unwrap();
    assert_eq!(original, copy);
}

#[test]
fn remove_at_start_past_the_end_yields_an_empty_view_not_an_error() {
    let mut view = BufferView::new(8);
    view.grow_at_end(4).unwrap();
    view.remove_at_start(100);
    assert_eq!(view.size(), 0);
}

#[test]
fn byte_order_round_trips_match_a_manual_byteswap() {
    let mut view = BufferView::new(8);
    view.grow_at_end(4).unwrap();
    view.iter().write_u32(0x01020304, ByteOrder::Big).unwrap();
    let read_as_little = view.iter().read_u32(ByteOrder::Little).unwrap();
    assert_eq!(read_as_little, 0x01020304u32.swap_bytes());
}
