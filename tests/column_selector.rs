//! Column selection across chunk sizes.
//!
//! Every dataset is pushed through the engine at chunk sizes 1, 5, 10, 20,
//! 100 and 1000, selecting every single column and every column pair, both
//! by index and by header name. The expected output is built independently
//! by splitting rows and cells in memory.

use tabsel::{ColumnSelectionEngine, SelectorOptions};

const CHUNK_SIZES: [usize; 6] = [1, 5, 10, 20, 100, 1000];

struct Dataset {
    name: &'static str,
    rows: Vec<Vec<&'static str>>,
}

/// Trailing empty row means the file ends with a newline.
fn datasets() -> Vec<Dataset> {
    let mut sets = Vec::new();
    for trailing_blank in [true, false] {
        let mut push = |name: &'static str, mut rows: Vec<Vec<&'static str>>| {
            if trailing_blank {
                rows.push(Vec::new());
            }
            sets.push(Dataset { name, rows });
        };
        push(
            "same cell sizes, 3x2",
            vec![vec!["col1", "col2", "col3"], vec!["1234", "2345", "3456"]],
        );
        push(
            "different cell sizes, 3x2",
            vec![vec!["col1", "col2", "col3"], vec!["1", "23", "345"]],
        );
        push(
            "same cell sizes, 3x6",
            vec![
                vec!["col1", "col2", "col3"],
                vec!["1234", "2345", "3456"],
                vec!["2345", "3456", "4567"],
                vec!["3456", "4567", "5678"],
                vec!["4567", "5678", "6789"],
                vec!["5678", "6789", "7890"],
            ],
        );
        push(
            "same cell sizes, 4x6, blank column",
            vec![
                vec!["col1", "col2", "col3", "col4"],
                vec!["1234", "2345", "", "4567"],
                vec!["2345", "3456", "", "5678"],
                vec!["3456", "4567", "", "6789"],
                vec!["4567", "5678", "", "7890"],
                vec!["5678", "6789", "", "8901"],
            ],
        );
    }
    sets
}

fn encode(rows: &[Vec<&str>]) -> Vec<u8> {
    rows.iter()
        .map(|r| r.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

/// Expected output: the wanted cells each row actually has, in ascending order.
fn expected(rows: &[Vec<&str>], wanted: &[usize]) -> Vec<u8> {
    rows.iter()
        .map(|r| {
            wanted
                .iter()
                .filter_map(|&i| r.get(i).copied())
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}

fn run_chunked(options: &SelectorOptions, input: &[u8], chunk_size: usize) -> Vec<u8> {
    let mut engine = ColumnSelectionEngine::from_options(options).unwrap();
    let mut out = Vec::new();
    for chunk in input.chunks(chunk_size) {
        out.extend(engine.process(chunk).unwrap());
    }
    out.extend(engine.flush().unwrap());
    out
}

fn selections(width: usize) -> Vec<Vec<usize>> {
    let mut all: Vec<Vec<usize>> = (0..width).map(|i| vec![i]).collect();
    for a in 0..width {
        for b in a + 1..width {
            all.push(vec![a, b]);
        }
    }
    all
}

#[test]
fn test_selection_by_index() {
    for dataset in datasets() {
        let input = encode(&dataset.rows);
        for wanted in selections(dataset.rows[0].len()) {
            let options = SelectorOptions::new().with_col_indexes(wanted.clone());
            let want = expected(&dataset.rows, &wanted);
            for size in CHUNK_SIZES {
                assert_eq!(
                    run_chunked(&options, &input, size),
                    want,
                    "{}: columns {:?}, chunk size {}",
                    dataset.name,
                    wanted,
                    size
                );
            }
        }
    }
}

#[test]
fn test_selection_by_name() {
    for dataset in datasets() {
        let input = encode(&dataset.rows);
        let header = &dataset.rows[0];
        for wanted in selections(header.len()) {
            let names: Vec<&str> = wanted.iter().map(|&i| header[i]).collect();
            let options = SelectorOptions::new().with_col_names(names.clone());
            let want = expected(&dataset.rows, &wanted);
            for size in CHUNK_SIZES {
                assert_eq!(
                    run_chunked(&options, &input, size),
                    want,
                    "{}: names {:?}, chunk size {}",
                    dataset.name,
                    names,
                    size
                );
            }
        }
    }
}

#[test]
fn test_reversed_request_order_is_normalized() {
    for dataset in datasets() {
        let input = encode(&dataset.rows);
        let width = dataset.rows[0].len();
        let reversed: Vec<usize> = (0..width).rev().collect();
        let options = SelectorOptions::new().with_col_indexes(reversed);
        let ascending: Vec<usize> = (0..width).collect();
        assert_eq!(
            run_chunked(&options, &input, 7),
            expected(&dataset.rows, &ascending),
            "{}",
            dataset.name
        );
    }
}

#[test]
fn test_documented_examples() {
    let cases: [(&[u8], SelectorOptions, &[u8]); 4] = [
        (
            &b"a\tb\tc\n1\t2\t3\n"[..],
            SelectorOptions::new().with_col_indexes([0, 2]),
            &b"a\tc\n1\t3\n"[..],
        ),
        (
            &b"a\tb\tc\n1\t2\t3"[..],
            SelectorOptions::new().with_col_indexes([1]),
            &b"b\n2"[..],
        ),
        (
            &b"a\tb\n1\t2\n\n"[..],
            SelectorOptions::new().with_col_indexes([0]),
            &b"a\n1\n\n"[..],
        ),
        (
            &b"name\tage\nAda\t30\n"[..],
            SelectorOptions::new().with_col_names(["age"]),
            &b"age\n30\n"[..],
        ),
    ];

    for (input, options, want) in cases {
        for size in CHUNK_SIZES {
            assert_eq!(run_chunked(&options, input, size), want);
        }
    }
}
