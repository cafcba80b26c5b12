use repobundle::{
    BinaryDetection, BundleError, ConsolidateBuilder, DEFAULT_DESCRIPTION, DEFAULT_OUTPUT,
    DEFAULT_TITLE, SkipReason, consolidate, consolidate_to_writer,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
#[test]
fn integration_full_flow() {
    let root = tempdir().unwrap();
    let out = tempdir().unwrap();
    write_file(&root.path().join("a.py"), "x=1");
    write_file(&root.path().join("docs/b.md"), "hello");
    write_file(&root.path().join("node_modules/c.js"), "module.exports = 1;");
    let output = out.path().join("bundle.md");
    let options = ConsolidateBuilder::new(root.path()).output(&output).build();
    let report = consolidate(&options).unwrap();
    assert_eq!(report.files_written, 2);
    assert!(report.skipped.is_empty());
    assert_eq!(report.output, output);
    let document = fs::read_to_string(&output).unwrap();
    let expected = format!(
        "# {}\n{}\n\n--- \n### ARQUIVO: a.py\n```py\nx=1\n```\n\n--- \n### ARQUIVO: {}\n```md\nhello\n```\n\n",
        DEFAULT_TITLE,
        DEFAULT_DESCRIPTION,
        Path::new("docs").join("b.md").display()
    );
    assert_eq!(document, expected);
    assert!(!document.contains("c.js"));
}
#[test]
fn integration_one_block_per_file() {
    let root = tempdir().unwrap();
    let files = ["one.rs", "two/three.ts", "two/four/five.json", "six"];
    for f in files {
        write_file(&root.path().join(f), "content");
    }
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path()).build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    let document = String::from_utf8(buf).unwrap();
    assert_eq!(report.files_written, files.len());
    assert_eq!(document.matches("### ARQUIVO: ").count(), files.len());
    for f in files {
        let header = format!("### ARQUIVO: {}\n", PathBuf::from(f).display());
        assert!(document.contains(&header), "missing {}", f);
    }
    assert!(document.contains("```text\ncontent\n```"));
}
#[test]
fn integration_ignored_dirs_pruned_at_any_depth() {
    let root = tempdir().unwrap();
    write_file(&root.path().join("src/app.ts"), "app");
    write_file(&root.path().join("src/deep/node_modules/pkg/index.ts"), "nested");
    write_file(&root.path().join(".git/config"), "[core]");
    write_file(&root.path().join("packages/web/dist/bundle.js"), "built");
    write_file(&root.path().join("server/__pycache__/x.py"), "cached");
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path()).build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    let document = String::from_utf8(buf).unwrap();
    assert_eq!(report.files_written, 1);
    assert!(document.contains("app.ts"));
    for absent in ["nested", "[core]", "built", "cached"] {
        assert!(!document.contains(absent), "{} leaked", absent);
    }
}
#[test]
fn integration_ignored_extensions_case_insensitive() {
    let root = tempdir().unwrap();
    write_file(&root.path().join("LOGO.PNG"), "png");
    write_file(&root.path().join("assets/icon.svg"), "<svg/>");
    write_file(&root.path().join("yarn.lock"), "lock");
    write_file(&root.path().join("index.html"), "<html></html>");
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path())
        .add_ignore_extension("HTML")
        .build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    assert_eq!(report.files_written, 0);
    assert!(report.skipped.is_empty());
    let document = String::from_utf8(buf).unwrap();
    assert!(!document.contains("ARQUIVO"));
}
#[test]
fn integration_output_not_included_and_overwritten() {
    let root = tempdir().unwrap();
    write_file(&root.path().join("main.rs"), "fn main() {}");
    let output = root.path().join(DEFAULT_OUTPUT);
    write_file(&output, "stale contents from a previous run");
    write_file(&root.path().join("nested").join(DEFAULT_OUTPUT), "older copy");
    let options = ConsolidateBuilder::new(root.path()).output(&output).build();
    let report = consolidate(&options).unwrap();
    assert_eq!(report.files_written, 1);
    let document = fs::read_to_string(&output).unwrap();
    assert!(!document.contains("stale contents"));
    assert!(!document.contains("older copy"));
    assert!(!document.contains(DEFAULT_OUTPUT));
    assert!(document.contains("### ARQUIVO: main.rs"));
}
#[test]
fn integration_unreadable_file_does_not_abort() {
    let root = tempdir().unwrap();
    write_file(&root.path().join("a.txt"), "first");
    fs::write(root.path().join("b.bin"), [0xc3u8, 0x28, 0xa0, 0xa1]).unwrap();
    write_file(&root.path().join("c.txt"), "third");
    let output = root.path().join("out.md");
    let options = ConsolidateBuilder::new(root.path()).output(&output).build();
    let report = consolidate(&options).unwrap();
    assert_eq!(report.files_written, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].relative_path, PathBuf::from("b.bin"));
    assert!(matches!(report.skipped[0].reason, SkipReason::Decode(_)));
    let document = fs::read_to_string(&output).unwrap();
    assert!(document.contains("first"));
    assert!(document.contains("third"));
    assert!(!document.contains("b.bin"));
}
#[test]
fn integration_hidden_files_included_by_default() {
    let root = tempdir().unwrap();
    write_file(&root.path().join(".env.example"), "PORT=3000");
    write_file(&root.path().join(".github/workflows/ci.yml"), "on: push");
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path()).build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    assert_eq!(report.files_written, 2);
    let document = String::from_utf8(buf).unwrap();
    assert!(document.contains("```example\nPORT=3000\n```"));
    assert!(document.contains("```yml\non: push\n```"));

    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path())
        .include_hidden(false)
        .build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    assert_eq!(report.files_written, 0);
}
#[test]
fn integration_ignore_patterns() {
    let root = tempdir().unwrap();
    write_file(&root.path().join("keep.ts"), "keep");
    write_file(&root.path().join("logs/app.log"), "log line");
    write_file(&root.path().join("generated/types.ts"), "generated");
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path())
        .ignore_patterns(vec!["*.log".into(), "generated".into()])
        .build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    assert_eq!(report.files_written, 1);
    let document = String::from_utf8(buf).unwrap();
    assert!(document.contains("keep.ts"));
    assert!(!document.contains("log line"));
    assert!(!document.contains("generated"));
}
#[test]
fn integration_max_depth() {
    let root = tempdir().unwrap();
    write_file(&root.path().join("top.txt"), "top");
    write_file(&root.path().join("a/b/deep.txt"), "deep");
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path()).max_depth(1).build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    assert_eq!(report.files_written, 1);
    assert!(!String::from_utf8(buf).unwrap().contains("deep"));
}
#[test]
fn integration_tree_section() {
    let root = tempdir().unwrap();
    write_file(&root.path().join("a.py"), "x=1");
    write_file(&root.path().join("docs/b.md"), "hello");
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path())
        .include_tree(true)
        .build();
    consolidate_to_writer(&options, &mut buf).unwrap();
    let document = String::from_utf8(buf).unwrap();
    let tree_at = document.find("## ESTRUTURA\n```text\n").unwrap();
    let first_file_at = document.find("### ARQUIVO:").unwrap();
    assert!(tree_at < first_file_at);
    assert!(document.contains("├── a.py\n├── docs\n│   ├── b.md\n```"));
}
#[test]
fn integration_missing_root_is_fatal() {
    let out = tempdir().unwrap();
    let output = out.path().join("out.md");
    let options = ConsolidateBuilder::new(out.path().join("does-not-exist"))
        .output(&output)
        .build();
    let err = consolidate(&options).unwrap_err();
    assert!(matches!(err, BundleError::Io { .. }));
    assert!(!output.exists());
}
#[test]
fn integration_root_must_be_directory() {
    let root = tempdir().unwrap();
    let file = root.path().join("file.txt");
    write_file(&file, "not a dir");
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(&file).build();
    let err = consolidate_to_writer(&options, &mut buf).unwrap_err();
    assert!(matches!(err, BundleError::InvalidPath(_)));
}
#[test]
fn integration_unwritable_output_is_fatal() {
    let root = tempdir().unwrap();
    write_file(&root.path().join("a.txt"), "a");
    let output = root.path().join("missing-dir").join("out.md");
    let options = ConsolidateBuilder::new(root.path()).output(&output).build();
    match consolidate(&options) {
        Err(BundleError::Io { path, .. }) => assert_eq!(path, output),
        other => panic!("expected output I/O error, got {:?}", other),
    }
}
#[test]
fn integration_gitignore_honored_outside_git_repo() {
    let root = tempdir().unwrap();
    write_file(&root.path().join(".gitignore"), "secret.txt\ntmp/\n");
    write_file(&root.path().join("secret.txt"), "SECRET");
    write_file(&root.path().join("tmp/scratch.txt"), "SCRATCH");
    write_file(&root.path().join("public.txt"), "PUBLIC");
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path()).build();
    consolidate_to_writer(&options, &mut buf).unwrap();
    assert!(String::from_utf8(buf).unwrap().contains("SECRET"));

    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path())
        .respect_gitignore(true)
        .build();
    consolidate_to_writer(&options, &mut buf).unwrap();
    let document = String::from_utf8(buf).unwrap();
    assert!(document.contains("PUBLIC"));
    assert!(!document.contains("SECRET"));
    assert!(!document.contains("SCRATCH"));
}
#[test]
fn integration_bad_pattern_keeps_previous_output() {
    let root = tempdir().unwrap();
    write_file(&root.path().join("a.txt"), "a");
    let output = root.path().join("out.md");
    write_file(&output, "PREVIOUS RUN");
    let options = ConsolidateBuilder::new(root.path())
        .output(&output)
        .add_ignore_pattern("[")
        .build();
    let err = consolidate(&options).unwrap_err();
    assert!(matches!(err, BundleError::Pattern(_)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "PREVIOUS RUN");
}
#[test]
fn integration_missing_root_keeps_previous_output() {
    let out = tempdir().unwrap();
    let output = out.path().join("out.md");
    write_file(&output, "PREVIOUS RUN");
    let options = ConsolidateBuilder::new(out.path().join("gone"))
        .output(&output)
        .build();
    assert!(consolidate(&options).is_err());
    assert_eq!(fs::read_to_string(&output).unwrap(), "PREVIOUS RUN");
}
#[cfg(unix)]
#[test]
fn integration_symlinks() {
    use std::os::unix::fs::symlink;
    let root = tempdir().unwrap();
    let outside = tempdir().unwrap();
    write_file(&outside.path().join("shared/lib.ts"), "LINKED DIR");
    write_file(&outside.path().join("notes.md"), "LINKED FILE");
    symlink(outside.path().join("shared"), root.path().join("shared")).unwrap();
    symlink(outside.path().join("notes.md"), root.path().join("notes.md")).unwrap();

    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path()).build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    let document = String::from_utf8(buf).unwrap();
    assert_eq!(report.files_written, 1);
    assert!(document.contains("LINKED FILE"));
    assert!(!document.contains("LINKED DIR"));

    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path()).follow_links(true).build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    let document = String::from_utf8(buf).unwrap();
    assert_eq!(report.files_written, 2);
    assert!(document.contains("LINKED DIR"));
    let header = format!("### ARQUIVO: {}\n", Path::new("shared").join("lib.ts").display());
    assert!(document.contains(&header));
}
#[cfg(unix)]
#[test]
fn integration_symlink_loop_is_skipped() {
    use std::os::unix::fs::symlink;
    let root = tempdir().unwrap();
    write_file(&root.path().join("a/file.txt"), "inside");
    symlink(root.path(), root.path().join("a/loop")).unwrap();
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path()).follow_links(true).build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    assert_eq!(report.files_written, 1);
    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(report.skipped[0].reason, SkipReason::Walk(_)));
    assert_eq!(
        report.skipped[0].relative_path,
        Path::new("a").join("loop")
    );
}
#[test]
fn integration_unsorted_emits_every_file() {
    let root = tempdir().unwrap();
    let files = ["zeta.txt", "alpha.txt", "mid/beta.txt", "mid/able.txt"];
    for f in files {
        write_file(&root.path().join(f), f);
    }
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path())
        .sort_entries(false)
        .build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    let document = String::from_utf8(buf).unwrap();
    assert_eq!(report.files_written, files.len());
    assert_eq!(document.matches("### ARQUIVO: ").count(), files.len());
    for f in files {
        let header = format!("### ARQUIVO: {}\n", PathBuf::from(f).display());
        assert_eq!(document.matches(&header).count(), 1, "{}", f);
    }
}
#[test]
fn integration_sorted_order_is_by_name() {
    let root = tempdir().unwrap();
    for f in ["zeta.txt", "alpha.txt", "mid/beta.txt"] {
        write_file(&root.path().join(f), "x");
    }
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path()).build();
    consolidate_to_writer(&options, &mut buf).unwrap();
    let document = String::from_utf8(buf).unwrap();
    let alpha = document.find("alpha.txt").unwrap();
    let beta = document.find("beta.txt").unwrap();
    let zeta = document.find("zeta.txt").unwrap();
    assert!(alpha < beta && beta < zeta);
}
#[test]
fn integration_binary_detection_accurate() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("blob.dat"), b"abc\0def").unwrap();
    fs::write(root.path().join("utf16.txt"), [0xffu8, 0xfe, b'h', 0, b'i', 0]).unwrap();
    write_file(&root.path().join("plain.txt"), "plain");
    let mut buf = Vec::new();
    let options = ConsolidateBuilder::new(root.path())
        .binary_detection(BinaryDetection::Accurate)
        .build();
    let report = consolidate_to_writer(&options, &mut buf).unwrap();
    assert_eq!(report.files_written, 1);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].relative_path, PathBuf::from("blob.dat"));
    assert_eq!(report.skipped[0].reason, SkipReason::Binary);
    assert_eq!(report.skipped[1].relative_path, PathBuf::from("utf16.txt"));
    assert!(matches!(report.skipped[1].reason, SkipReason::Decode(_)));
    assert!(String::from_utf8(buf).unwrap().contains("plain"));
}
