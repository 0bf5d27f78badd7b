//! Golden tests for kbase
//!
//! These tests run the binary against the checked-in fixtures and compare the
//! full output. Golden tests ensure:
//! - Output format stability across versions
//! - Lookup and phrase results stay identical on a known data set

use assert_cmd::Command;
use serde_json::{json, Value};
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Create a command bound to the fixture catalog and books
fn kbase_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kbase"));
    cmd.env_remove("RUST_LOG")
        .arg("--records")
        .arg(fixtures_dir().join("catalog.txt"))
        .arg("--books")
        .arg(fixtures_dir().join("books"));
    cmd
}

/// Parse JSONL output into a vector of JSON values
fn parse_jsonl(output: &str) -> Vec<Value> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str::<Value>(l).ok())
        .collect()
}

fn run_jsonl(args: &[&str]) -> Vec<Value> {
    let output = kbase_cmd().args(args).output().expect("Failed to run kbase");
    assert!(output.status.success(), "kbase {:?} failed", args);
    parse_jsonl(&String::from_utf8_lossy(&output.stdout))
}

fn run_text(args: &[&str]) -> String {
    let output = kbase_cmd()
        .args(["--format", "text"])
        .args(args)
        .output()
        .expect("Failed to run kbase");
    assert!(output.status.success(), "kbase {:?} failed", args);
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn record(id: &str, title: &str, author: &str, description: &str) -> Value {
    json!({
        "kind": "record",
        "record": {
            "id": id,
            "title": title,
            "author": author,
            "description": description
        },
        "meta": {}
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Lookup Tests ====================

    #[test]
    fn golden_id_exact() {
        let items = run_jsonl(&["id", "ID-000005"]);
        assert_eq!(
            items,
            vec![record(
                "000005",
                "O Cortiço",
                "Aluísio Azevedo",
                "Vida num cortiço carioca"
            )]
        );
    }

    #[test]
    fn golden_id_first_and_last() {
        let first = run_jsonl(&["id", "1"]);
        assert_eq!(first[0]["record"]["title"], "Dom Casmurro");

        let last = run_jsonl(&["id", "20"]);
        assert_eq!(last[0]["record"]["author"], "Mário de Andrade");
    }

    #[test]
    fn golden_range() {
        let items = run_jsonl(&["range", "ID-000005", "ID-000015"]);
        assert_eq!(
            items,
            vec![
                record("000005", "O Cortiço", "Aluísio Azevedo", "Vida num cortiço carioca"),
                record("000010", "Iracema", "José de Alencar", "Lenda do Ceará"),
                record("000015", "Vidas Secas", "Graciliano Ramos", "Retirantes no sertão"),
            ]
        );
    }

    #[test]
    fn golden_range_past_both_ends() {
        let items = run_jsonl(&["range", "0", "999999"]);
        assert_eq!(items.len(), 5);
    }

    #[test]
    fn golden_id_text() {
        assert_eq!(
            run_text(&["id", "000010"]),
            "id: 000010\n----\nid: 000010\ntitle: Iracema\nauthor: José de Alencar\ndescription: Lenda do Ceará\n"
        );
    }

    // ==================== Phrase Tests ====================

    #[test]
    fn golden_phrase_o_amor() {
        let items = run_jsonl(&["phrase", "o amor"]);
        let ranges: Vec<(String, u64, u64)> = items
            .iter()
            .map(|v| {
                (
                    v["path"].as_str().unwrap().to_string(),
                    v["range"]["start"].as_u64().unwrap(),
                    v["range"]["end"].as_u64().unwrap(),
                )
            })
            .collect();

        assert_eq!(
            ranges,
            vec![
                ("01_book_test.txt".to_string(), 1, 2),
                ("01_book_test.txt".to_string(), 2, 2),
                ("01_book_test.txt".to_string(), 3, 3),
            ]
        );
    }

    #[test]
    fn golden_phrase_single_line() {
        let items = run_jsonl(&["phrase", "no nosso jardim havia flores"]);
        assert!(items.contains(&json!({
            "kind": "match",
            "path": "02_book_test.txt",
            "range": { "start": 2, "end": 2 },
            "excerpt": "No nosso jardim havia flores de todas as cores.",
            "meta": {}
        })));
    }

    #[test]
    fn golden_phrase_two_lines_text() {
        assert_eq!(
            run_text(&["phrase", "todas as cores as flores"]),
            "phrase: \"todas as cores as flores\"\n----\nfile: 02_book_test.txt\nlines: 2-3\n"
        );
    }

    #[test]
    fn golden_phrase_not_found_text() {
        assert_eq!(
            run_text(&["phrase", "texto inexistente"]),
            "phrase: \"texto inexistente\"\n----\nnot found\n"
        );
    }

    #[test]
    fn golden_phrase_wildcard() {
        let items = run_jsonl(&["phrase", "descobert.s"]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["path"], "03_book_test.txt");
        assert_eq!(items[0]["range"], json!({ "start": 1, "end": 1 }));
    }

    // ==================== Books & Stats Tests ====================

    #[test]
    fn golden_books() {
        let items = run_jsonl(&["books"]);
        assert_eq!(
            items,
            vec![
                json!({ "kind": "document", "path": "01_book_test.txt", "meta": { "size": 179 } }),
                json!({ "kind": "document", "path": "02_book_test.txt", "meta": { "size": 189 } }),
                json!({ "kind": "document", "path": "03_book_test.txt", "meta": { "size": 189 } }),
            ]
        );
    }

    #[test]
    fn golden_books_text() {
        assert_eq!(
            run_text(&["books"]),
            " 1. 01_book_test.txt\n 2. 02_book_test.txt\n 3. 03_book_test.txt\n"
        );
    }

    #[test]
    fn golden_stats() {
        let items = run_jsonl(&["stats"]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["kind"], "stats");

        let data = &items[0]["data"];
        assert_eq!(data["total_records"], 5);
        assert_eq!(data["file_size_bytes"], 1000);
        assert_eq!(data["line_size"], 200);
        assert_eq!(data["estimated_max_comparisons"], 3);
        assert_eq!(data["documents_available"], 3);
        assert!(data["records_file"].as_str().unwrap().ends_with("catalog.txt"));
    }

    #[test]
    fn golden_stats_markdown() {
        let output = kbase_cmd()
            .args(["--format", "md", "stats"])
            .output()
            .expect("Failed to run kbase");
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(stdout.starts_with("# stats\n\n## Stats\n\n"));
        assert!(stdout.contains("- **total_records**: 5\n"));
        assert!(!stdout.contains("_No results._"));
    }
}
