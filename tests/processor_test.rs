use projinit::error::{Error, Result};
use projinit::ignore::Exclusions;
use projinit::pattern::{PatternSet, ProjectId, ProjectInputs};
use projinit::processor::{Outcome, Processor, Summary};
use projinit::scanner::EntryKind;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

fn inputs(name: &str, exec: &str, id: Option<u32>) -> ProjectInputs {
    ProjectInputs {
        project_id: id
            .map(|id| ProjectId::new(id).unwrap())
            .unwrap_or_else(ProjectId::generate),
        project_name: name.to_string(),
        exec_name: exec.to_string(),
    }
}

fn configure(root: &Path, inputs: &ProjectInputs, dry_run: bool) -> Result<Outcome> {
    let patterns = PatternSet::from_inputs(inputs)?;
    let exclusions = Exclusions::for_root(root, &[] as &[&str])?;
    Processor::new(root, &patterns, &exclusions, dry_run).run()
}

/// Builds the same template tree in two scratch directories so one can serve
/// as the untouched reference.
fn template_pair(build: fn(&Path)) -> (TempDir, TempDir) {
    let work = TempDir::new().unwrap();
    let reference = TempDir::new().unwrap();
    build(work.path());
    build(reference.path());
    (work, reference)
}

fn assert_unchanged(work: &TempDir, reference: &TempDir) {
    assert!(!dir_diff::is_different(work.path(), reference.path()).unwrap());
}

fn hello_world(root: &Path) {
    write(
        root,
        "include/<PROJECT_NAME>.h",
        b"#ifndef __PROJID___H\n#define <PROJECT_NAME>_MAIN <EXEC>\n#endif",
    );
    write(
        root,
        "src/<EXEC>/main.cpp",
        b"#include \"<PROJECT_NAME>.h\"\nint main() { return 0; }\n",
    );
    write(root, "CMakeLists.txt", b"project(<PROJECT_NAME>)\nadd_executable(<EXEC>)\n");
    write(root, ".git/<PROJECT_NAME>", b"<PROJECT_NAME>");
    write(root, "build/<EXEC>.o", b"<EXEC>");
    write(root, "package.json", b"{\"name\": \"<PROJECT_NAME>\"}");
}

#[test_log::test]
fn test_header_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    hello_world(root);

    let outcome = configure(root, &inputs("Widget", "widget_main", Some(123_456)), false).unwrap();

    assert_eq!(
        read(root, "include/Widget.h"),
        "#ifndef 123456_H\n#define Widget_MAIN widget_main\n#endif"
    );
    assert_eq!(
        read(root, "src/widget_main/main.cpp"),
        "#include \"Widget.h\"\nint main() { return 0; }\n"
    );
    assert_eq!(
        read(root, "CMakeLists.txt"),
        "project(Widget)\nadd_executable(widget_main)\n"
    );
    assert!(!root.join("include/<PROJECT_NAME>.h").exists());
    assert!(!root.join("src/<EXEC>").exists());

    // Excluded entries are left alone
    assert_eq!(read(root, ".git/<PROJECT_NAME>"), "<PROJECT_NAME>");
    assert_eq!(read(root, "build/<EXEC>.o"), "<EXEC>");
    assert_eq!(read(root, "package.json"), "{\"name\": \"<PROJECT_NAME>\"}");

    assert_eq!(outcome.renamed(EntryKind::Directory), 1);
    assert_eq!(outcome.renamed(EntryKind::File), 1);
    assert_eq!(outcome.content.rewritten.len(), 3);
    assert!(!outcome.content.has_failures());
}

#[test_log::test]
fn test_nested_directories_rename_parent_first() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "<PROJECT_NAME>/<PROJECT_NAME>_sub/file.txt",
        b"name=<PROJECT_NAME> exec=<EXEC>",
    );

    configure(root, &inputs("Foo", "foo", None), false).unwrap();

    assert_eq!(read(root, "Foo/Foo_sub/file.txt"), "name=Foo exec=foo");
    assert!(!root.join("<PROJECT_NAME>").exists());
}

#[test]
fn test_generated_id_appears_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "guard.h", b"__PROJID__ and __PROJID__");

    let run_inputs = inputs("Foo", "foo", None);
    configure(root, &run_inputs, false).unwrap();

    let id = run_inputs.project_id.value();
    assert!((100_000..=999_999).contains(&id));
    assert_eq!(read(root, "guard.h"), format!("{} and {}", id, id));
}

#[test]
fn test_forbidden_project_name_changes_nothing() {
    for name in ["my project", "<Foo", "Foo>"] {
        let (work, reference) = template_pair(hello_world);

        let result = configure(work.path(), &inputs(name, "main", None), false);

        assert!(matches!(result, Err(Error::InvalidInput(_))), "{name:?}");
        assert_unchanged(&work, &reference);
    }
}

#[test]
fn test_excluded_only_tree_is_unchanged() {
    fn excluded_only(root: &Path) {
        write(root, ".git/<PROJECT_NAME>", b"<EXEC>");
        write(root, "build/<EXEC>", b"__PROJID__");
        write(root, "node_modules/<EXEC>/index.js", b"<PROJECT_NAME>");
        write(root, "package-lock.json", b"<PROJECT_NAME>");
    }
    let (work, reference) = template_pair(excluded_only);

    let outcome = configure(work.path(), &inputs("Foo", "foo", None), false).unwrap();

    assert!(outcome.renames.is_empty());
    assert!(outcome.content.rewritten.is_empty());
    assert_eq!(outcome.content.unchanged, 0);
    assert_unchanged(&work, &reference);
}

#[test]
fn test_second_run_is_noop() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    hello_world(root);
    let run_inputs = inputs("Widget", "widget_main", Some(123_456));

    configure(root, &run_inputs, false).unwrap();
    let snapshot = TempDir::new().unwrap();
    for file in ["include/Widget.h", "src/widget_main/main.cpp", "CMakeLists.txt"] {
        write(snapshot.path(), file, read(root, file).as_bytes());
    }

    let outcome = configure(root, &run_inputs, false).unwrap();

    assert!(outcome.renames.is_empty());
    assert!(outcome.content.rewritten.is_empty());
    assert_eq!(outcome.content.unchanged, 3);
    for file in ["include/Widget.h", "src/widget_main/main.cpp", "CMakeLists.txt"] {
        assert_eq!(read(root, file), read(snapshot.path(), file));
    }
}

#[test]
fn test_colliding_names_conflict_before_any_change() {
    fn colliding(root: &Path) {
        write(root, "<EXEC>/x.txt", b"<EXEC>");
        write(root, "<PROJECT_NAME>.txt", b"<PROJECT_NAME>");
        write(root, "Foo.txt", b"existing");
    }
    let (work, reference) = template_pair(colliding);

    let result = configure(work.path(), &inputs("Foo", "foo", None), false);

    match result {
        Err(Error::Conflict { path }) => assert_eq!(path, PathBuf::from("Foo.txt")),
        other => panic!("Expected Conflict, got {:?}", other),
    }
    assert_unchanged(&work, &reference);
}

#[test]
fn test_existing_excluded_target_conflicts() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "<PROJECT_NAME>/a.txt", b"<PROJECT_NAME>");
    write(root, "build/out.txt", b"keep");

    let result = configure(root, &inputs("build", "main", None), false);

    assert!(matches!(result, Err(Error::Conflict { .. })));
    assert_eq!(read(root, "<PROJECT_NAME>/a.txt"), "<PROJECT_NAME>");
    assert_eq!(read(root, "build/out.txt"), "keep");
}

#[test_log::test]
fn test_binary_file_fails_others_continue() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "a_logo.bin", b"\x00\x01<EXEC>\xff");
    write(root, "b_latin1.txt", b"caf\xe9 <EXEC>");
    write(root, "c_main.c", b"int <EXEC>;");

    let outcome = configure(root, &inputs("Foo", "foo", None), false).unwrap();

    assert_eq!(outcome.content.failures.len(), 2);
    assert!(outcome
        .content
        .failures
        .iter()
        .all(|e| matches!(e, Error::IoFailure { .. })));
    assert_eq!(read(root, "c_main.c"), "int foo;");
    assert_eq!(fs::read(root.join("a_logo.bin")).unwrap(), b"\x00\x01<EXEC>\xff");
}

#[test]
fn test_dry_run_touches_nothing() {
    let (work, reference) = template_pair(hello_world);

    let outcome = configure(
        work.path(),
        &inputs("Widget", "widget_main", Some(123_456)),
        true,
    )
    .unwrap();

    assert_unchanged(&work, &reference);
    assert_eq!(outcome.renames.len(), 2);
    assert!(outcome
        .content
        .rewritten
        .contains(&PathBuf::from("include/Widget.h")));
    assert!(outcome
        .content
        .rewritten
        .contains(&PathBuf::from("src/widget_main/main.cpp")));
}

#[test]
fn test_ignore_file_excludes_entries() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, ".initignore", b"# keep docs verbatim\ndocs\n");
    write(root, "docs/<PROJECT_NAME>.md", b"<PROJECT_NAME>");
    write(root, "README.md", b"# <PROJECT_NAME>");

    configure(root, &inputs("Foo", "foo", None), false).unwrap();

    assert_eq!(read(root, "docs/<PROJECT_NAME>.md"), "<PROJECT_NAME>");
    assert_eq!(read(root, "README.md"), "# Foo");
    assert_eq!(read(root, ".initignore"), "# keep docs verbatim\ndocs\n");
}

#[test]
fn test_summary() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    hello_world(root);
    let run_inputs = inputs("Widget", "widget_main", Some(123_456));

    let outcome = configure(root, &run_inputs, false).unwrap();
    let summary = Summary::new(&run_inputs, &outcome, false);

    let text = summary.to_string();
    assert!(text.contains("project id 123456 with name Widget"));
    assert!(text.contains("\"widget_main\""));

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["project_id"], 123_456);
    assert_eq!(json["project_name"], "Widget");
    assert_eq!(json["exec_name"], "widget_main");
    assert_eq!(json["directories_renamed"], 1);
    assert_eq!(json["files_renamed"], 1);
    assert_eq!(json["files_rewritten"], 3);
    assert_eq!(json["renames"][0]["kind"], "directory");
    assert_eq!(json["renames"][0]["to"], "src/widget_main");
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_name_is_left_untouched() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let odd_name = OsStr::from_bytes(b"odd\xff<EXEC>.txt");
    fs::write(root.join(odd_name), "exec=<EXEC>").unwrap();
    write(root, "<EXEC>.txt", b"<EXEC>");

    let outcome = configure(root, &inputs("Foo", "foo", None), false).unwrap();

    assert_eq!(outcome.renames.len(), 1);
    assert_eq!(fs::read_to_string(root.join(odd_name)).unwrap(), "exec=foo");
    assert_eq!(read(root, "foo.txt"), "foo");
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_renamed() {
    let outside = TempDir::new().unwrap();
    write(outside.path(), "<PROJECT_NAME>.txt", b"<PROJECT_NAME>");

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "main.c", b"<EXEC>");
    std::os::unix::fs::symlink(outside.path(), root.join("<PROJECT_NAME>_link")).unwrap();

    let outcome = configure(root, &inputs("Foo", "foo", None), false).unwrap();

    assert!(outcome.renames.is_empty());
    assert!(fs::symlink_metadata(root.join("<PROJECT_NAME>_link")).is_ok());
    assert!(!root.join("Foo_link").exists());
    assert_eq!(read(outside.path(), "<PROJECT_NAME>.txt"), "<PROJECT_NAME>");
    assert_eq!(read(root, "main.c"), "foo");
}
