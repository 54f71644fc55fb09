use modweave::core::ModuleAnalyzer;
use modweave::formatters::notebook::source_lines;
use modweave::formatters::{Cell, FlatFormatter, Notebook, NotebookFormatter};
use serde_json::Value;
use std::fs;

fn sample_tree() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("core")).unwrap();
    fs::create_dir_all(root.join("io")).unwrap();
    fs::write(root.join("core/types.py"), "import dataclasses\n\nclass Segment:\n    pass\n").unwrap();
    fs::write(
        root.join("io/reader.py"),
        "import core.types\nimport json\n\ndef load(path):\n    return json.load(open(path))\n",
    )
    .unwrap();
    dir
}

#[test]
fn notebook_has_four_cells_wrapping_the_flat_text() {
    let tree = sample_tree();
    let analysis = ModuleAnalyzer::new("python").unwrap().analyze(tree.path()).unwrap();

    let formatter = NotebookFormatter::new(FlatFormatter::for_python().unwrap());
    let notebook = formatter.build(&analysis);

    assert_eq!(notebook.nbformat, 4);
    assert_eq!(notebook.nbformat_minor, 4);
    assert_eq!(notebook.metadata.kernelspec.name, "python3");
    assert_eq!(notebook.cells.len(), 4);

    assert!(matches!(notebook.cells[0], Cell::Markdown { .. }));
    assert!(matches!(notebook.cells[1], Cell::Code { .. }));
    assert!(matches!(notebook.cells[2], Cell::Markdown { .. }));
    assert!(matches!(notebook.cells[3], Cell::Code { .. }));

    let code: String = notebook.cells[1].source().concat();
    assert_eq!(code, formatter.flat().format(&analysis));
    assert_eq!(notebook.cells[2].source(), ["## Usage Example".to_string()]);
}

#[test]
fn notebook_json_follows_nbformat_layout() {
    let tree = sample_tree();
    let analysis = ModuleAnalyzer::new("python").unwrap().analyze(tree.path()).unwrap();

    let out_dir = tempfile::TempDir::new().unwrap();
    let path = out_dir.path().join("combined.ipynb");
    NotebookFormatter::new(FlatFormatter::for_python().unwrap())
        .with_title("Audio Tools")
        .with_usage_example(["run()"])
        .format_to_file(&analysis, &path)
        .unwrap();

    let data = fs::read_to_string(&path).unwrap();
    // two-space indentation
    assert!(data.starts_with("{\n  \"cells\": ["));

    let v: Value = serde_json::from_str(&data).unwrap();
    assert_eq!(v["nbformat"], 4);
    assert_eq!(v["nbformat_minor"], 4);
    assert_eq!(v["metadata"]["kernelspec"]["display_name"], "Python 3");
    assert_eq!(v["metadata"]["kernelspec"]["language"], "python");

    let cells = v["cells"].as_array().unwrap();
    assert_eq!(cells[0]["cell_type"], "markdown");
    assert_eq!(cells[0]["source"][0], "# Audio Tools\n");
    assert_eq!(cells[1]["cell_type"], "code");
    assert!(cells[1]["execution_count"].is_null());
    assert_eq!(cells[1]["outputs"], Value::Array(vec![]));
    assert!(cells[1]["metadata"].as_object().unwrap().is_empty());
    assert_eq!(cells[3]["source"], serde_json::json!(["run()"]));

    // dependency order survives the wrapping
    let code: String = cells[1]["source"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line.as_str().unwrap())
        .collect();
    assert!(code.find("# From core/types.py").unwrap() < code.find("# From io/reader.py").unwrap());

    let parsed: Notebook = serde_json::from_str(&data).unwrap();
    assert_eq!(parsed.cells.len(), 4);
}

#[test]
fn writing_the_notebook_leaves_no_flat_intermediate() {
    let tree = sample_tree();
    let analysis = ModuleAnalyzer::new("python").unwrap().analyze(tree.path()).unwrap();

    let out_dir = tempfile::TempDir::new().unwrap();
    let path = out_dir.path().join("nb.ipynb");
    NotebookFormatter::new(FlatFormatter::for_python().unwrap())
        .format_to_file(&analysis, &path)
        .unwrap();

    let entries: Vec<_> = fs::read_dir(out_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("nb.ipynb")]);
}

#[test]
fn source_lines_keep_line_terminators() {
    assert_eq!(source_lines("a\nb\n"), vec!["a\n", "b\n"]);
    assert_eq!(source_lines("a\nb"), vec!["a\n", "b"]);
    assert!(source_lines("").is_empty());
}
