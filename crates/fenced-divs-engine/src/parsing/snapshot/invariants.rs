use xi_rope::Rope;

use crate::parsing::{ColonFence, rope::slice::slice_to_string, types::FencedDivInfo};

pub fn check(rope: &Rope, divs: &[FencedDivInfo]) {
    check_siblings(rope, divs, 0, rope.len());
}

fn check_siblings(rope: &Rope, divs: &[FencedDivInfo], lower: usize, upper: usize) {
    let mut prev_end = lower;
    for d in divs {
        assert!(
            d.from >= prev_end,
            "region starts before previous sibling ends: from {} < {}",
            d.from,
            prev_end
        );
        assert!(
            d.from < d.text_start && d.text_start <= d.to && d.to <= upper,
            "region offsets out of order or bounds: {}..{} text_start {} (limit {})",
            d.from,
            d.to,
            d.text_start,
            upper
        );

        let opener = slice_to_string(rope, d.from, d.text_start);
        assert!(
            opener.ends_with('\n') && !opener[..opener.len() - 1].contains('\n'),
            "text_start is not the line after the opener: {opener:?}"
        );
        assert!(
            ColonFence::opens(opener.trim_end_matches('\n')).is_some(),
            "region does not start on an opening fence: {opener:?}"
        );

        let body = slice_to_string(rope, d.from, d.to);
        let closer = body.rsplit('\n').next().unwrap_or_default();
        assert!(
            ColonFence::closes(closer),
            "region does not end on a closing fence: {closer:?}"
        );

        let children: Vec<FencedDivInfo> = d.children().cloned().collect();
        check_siblings(rope, &children, d.text_start, d.to);
        prev_end = d.to;
    }
}
