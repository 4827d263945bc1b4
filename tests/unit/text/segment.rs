use super::*;

fn run(script: ScriptClass, start: usize, len: usize) -> TextRun {
    TextRun { script, start, len }
}

fn assert_partition(text: &[u8], runs: &[TextRun]) {
    let mut cursor = 0usize;
    let mut rebuilt = Vec::new();
    for r in runs {
        assert_eq!(r.start, cursor, "gap or overlap at {cursor}");
        assert!(!r.is_empty());
        rebuilt.extend_from_slice(r.bytes(text).unwrap());
        cursor = r.start + r.len;
    }
    assert_eq!(rebuilt.as_slice(), &text[..scanned_len(runs)]);
}

#[test]
fn mixed_string_splits_at_script_boundaries() {
    let text = "A中B".as_bytes();
    assert_eq!(
        segment(text),
        vec![
            run(ScriptClass::Latin, 0, 1),
            run(ScriptClass::Cjk, 1, 3),
            run(ScriptClass::Latin, 4, 1),
        ]
    );
}

#[test]
fn single_script_strings_yield_one_run() {
    for s in ["Hello, world!", "中文字幕", "ｆｕｌｌｗｉｄｔｈ", "é"] {
        let runs = segment(s.as_bytes());
        assert_eq!(runs.len(), 1, "{s}");
        assert_eq!(runs[0].len, s.len());
    }
}

#[test]
fn first_code_point_sets_initial_class() {
    let runs = segment("中a".as_bytes());
    assert_eq!(runs[0].script, ScriptClass::Cjk);
    assert_eq!(runs[1], run(ScriptClass::Latin, 3, 1));
}

#[test]
fn empty_input_yields_no_runs() {
    assert!(segment(b"").is_empty());
    assert!(segment(b"\0trailing").is_empty());
    assert_eq!(scanned_len(&[]), 0);
}

#[test]
fn nul_byte_ends_scanning() {
    let text = b"ab\0cd";
    let runs = segment(text);
    assert_eq!(runs, vec![run(ScriptClass::Latin, 0, 2)]);
    assert_partition(text, &runs);
}

#[test]
fn malformed_sequence_halts_and_flushes_prior_run() {
    let mut text = "A中".as_bytes().to_vec();
    text.extend_from_slice(&[0xC0, b'A']);
    text.extend_from_slice("after".as_bytes());

    let runs = segment(&text);
    assert_eq!(
        runs,
        vec![run(ScriptClass::Latin, 0, 1), run(ScriptClass::Cjk, 1, 3)]
    );
    assert_eq!(scanned_len(&runs), 4);
}

#[test]
fn malformed_at_start_yields_nothing() {
    assert!(segment(&[0xC0, b'A', b'B']).is_empty());
    assert!(segment(&[0x80]).is_empty());
}

#[test]
fn malformed_mid_run_flushes_partial_run() {
    let text = [b'a', b'b', 0xBF, b'c'];
    assert_eq!(segment(&text), vec![run(ScriptClass::Latin, 0, 2)]);
}

#[test]
fn runs_partition_assorted_inputs() {
    let inputs: [&[u8]; 6] = [
        "The 勇者 arrives 。".as_bytes(),
        "ＡＢＣabc中".as_bytes(),
        "x".as_bytes(),
        b"plain ascii only",
        &[b'a', 0xE4, 0xB8, 0xAD, 0xF8, 0x88, 0x80, 0x80, 0x80, b'z'],
        &[0xE4, 0xB8, 0xAD, 0xE4, 0xB8],
    ];
    for text in inputs {
        let runs = segment(text);
        assert_partition(text, &runs);
        for pair in runs.windows(2) {
            assert_ne!(pair[0].script, pair[1].script);
        }
    }
}

#[test]
fn iterator_is_fused_after_halt() {
    let mut it = Runs::new(&[b'a', 0x80, b'b']);
    assert_eq!(it.next(), Some(run(ScriptClass::Latin, 0, 1)));
    assert_eq!(it.position(), 1);
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);
}
