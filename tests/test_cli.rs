use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const RAILS_NEXML: &str = r#"<nexml xmlns="http://www.nexml.org/2009">
  <otus id="taxa">
    <otu id="t1" label="Rallus aquaticus"/>
    <otu id="t2" label="Crex crex"/>
  </otus>
  <trees otus="taxa">
    <tree id="tree1">
      <node id="n1" root="true"/>
      <node id="n2" otu="t1"/>
      <node id="n3" otu="t2"/>
      <edge id="e1" source="n1" target="n2"/>
      <edge id="e2" source="n1" target="n3"/>
    </tree>
  </trees>
</nexml>"#;

/// Runs the command line tool from `working_dir`.
fn run(working_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_phylogroup"))
        .args(args)
        .current_dir(working_dir)
        .output()
        .unwrap()
}

/// Writes a test suite next to `rails.xml` into a `paper` directory.
fn write_suite(dir: &TempDir, filename: &str) -> String {
    let paper_dir = dir.path().join("paper");
    fs::create_dir(&paper_dir).unwrap();
    fs::write(paper_dir.join("rails.xml"), RAILS_NEXML).unwrap();

    let suite = json!({
        "@id": "http://example.org/rails",
        "phylogenies": [{
            "filename": filename,
            "labeledNodeData": [{"label": "Crex crex", "specimen": "NHMUK 1"}]
        }],
        "phylorefs": [{"label": "Rallidae"}]
    });
    let path = paper_dir.join("paper.json");
    fs::write(&path, suite.to_string()).unwrap();
    path.to_string_lossy().into_owned()
}

// --- TESTS CONVERSION ---
#[test]
fn test_convert_resolves_nexml_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write_suite(&dir, "rails.xml");
    let output = dir.path().join("paper.jsonld");
    let elsewhere = TempDir::new().unwrap();

    let result = run(
        elsewhere.path(),
        &[&input, "-o", &output.to_string_lossy(), "--context", "http://example.org/context.json"],
    );
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));

    let text = fs::read_to_string(&output).unwrap();
    // Sorted keys, indented by four spaces
    assert!(text.starts_with("{\n    \"@context\": \"http://example.org/context.json\",\n    \"@id\""));

    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["@id"], json!("http://example.org/rails#"));
    let phylogeny = &doc["phylogenies"][0]["phylogenies"][0];
    assert_eq!(phylogeny["@id"], json!("http://example.org/rails#phylogenies1_phylogeny1"));
    assert_eq!(phylogeny["nodes"][2]["specimen"], json!("NHMUK 1"));
    assert_eq!(doc["phylorefs"][0]["@id"], json!("http://example.org/rails#_phyloref1"));
}

#[test]
fn test_default_context_and_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_suite(&dir, "rails.xml");

    let result = run(dir.path(), &[&input]);
    assert!(result.status.success());

    let doc: Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(doc["@context"], json!("../paper-context.json"));
}

#[test]
fn test_missing_nexml_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_suite(&dir, "missing.xml");
    let output = dir.path().join("paper.jsonld");

    let result = run(dir.path(), &[&input, "-o", &output.to_string_lossy()]);
    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains(&format!("Could not read '{input}'")));
    assert!(stderr.contains("missing.xml"));
}

#[test]
fn test_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{\"@id\": ").unwrap();

    let result = run(dir.path(), &[&input.to_string_lossy()]);
    assert_eq!(result.status.code(), Some(1));
    assert!(result.stdout.is_empty());
}
