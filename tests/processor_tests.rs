mod common;

use anyhow::Result;
use common::{HEADER, processor, read_file, rel, setup_tree, with_block_header, write_file};
use headerfix::classifier::{CommentMarkers, ExclusionSet, RuleTable};
use headerfix::header::CanonicalHeader;
use headerfix::processor::{Processor, ProcessorConfig, RunError, RunMode};
use headerfix::report::{FailureKind, FileOutcome};

#[test]
fn test_insert_header_into_c_header() -> Result<()> {
  let tree = setup_tree()?;
  let original = "#pragma once\n\nint add(int a, int b);\n";
  write_file(tree.path(), "a.h", original)?;

  let report = processor(tree.path(), RunMode::Local)?.run()?;

  assert_eq!(report.outcome_of(&rel("a.h")), Some(FileOutcome::Inserted));
  assert_eq!(read_file(tree.path(), "a.h")?, with_block_header("/*", "*/", original));
  Ok(())
}

#[test]
fn test_replace_old_python_header() -> Result<()> {
  let tree = setup_tree()?;
  let before = "#!/usr/bin/env python3\n";
  let old_header = "---- Copyright Start ----\n\nApache License 2.0\n\nCopyright (c) 2015 Old Owner\n\n---- Copyright End ----";
  let after = "\n\"\"\"\n\nimport os\n\nprint(os.getcwd())\n";
  write_file(tree.path(), "tools/b.py", &format!("{before}\"\"\"\n{old_header}{after}"))?;

  let report = processor(tree.path(), RunMode::Local)?.run()?;

  assert_eq!(report.outcome_of(&rel("tools/b.py")), Some(FileOutcome::Replaced));
  let content = read_file(tree.path(), "tools/b.py")?;
  assert_eq!(content, format!("{before}\"\"\"\n{HEADER}{after}"));
  assert!(!content.contains("Old Owner"));
  assert_eq!(content.matches(HEADER).count(), 1);
  Ok(())
}

#[test]
fn test_foreign_header_aborts_local_run() -> Result<()> {
  let tree = setup_tree()?;
  let foreign = "// Copyright (c) 2010 Somebody Else. All rights reserved.\n\nint main() { return 0; }\n";
  write_file(tree.path(), "src/c.cc", foreign)?;

  let err = processor(tree.path(), RunMode::Local)?
    .run()
    .expect_err("foreign header must abort");

  assert!(matches!(err, RunError::ForeignHeader { ref path } if *path == rel("src/c.cc")));
  assert!(err.is_inconsistency());
  assert_eq!(read_file(tree.path(), "src/c.cc")?, foreign);
  Ok(())
}

#[test]
fn test_ci_reports_without_modifying() -> Result<()> {
  let tree = setup_tree()?;
  let bad = "int bad;\n";
  let good = with_block_header("/*", "*/", "int good;\n");
  write_file(tree.path(), "bad.cc", bad)?;
  write_file(tree.path(), "good.cc", &good)?;

  let report = processor(tree.path(), RunMode::Ci)?.run()?;

  assert!(!report.is_success());
  assert_eq!(report.outcome_of(&rel("bad.cc")), Some(FileOutcome::Failed(FailureKind::Missing)));
  assert_eq!(report.outcome_of(&rel("good.cc")), Some(FileOutcome::Approved));
  assert_eq!(report.modified().count(), 0);

  assert_eq!(read_file(tree.path(), "bad.cc")?, bad);
  assert_eq!(read_file(tree.path(), "good.cc")?, good);
  Ok(())
}

#[test]
fn test_ci_continues_past_foreign_header() -> Result<()> {
  let tree = setup_tree()?;
  write_file(tree.path(), "a.cc", "// Copyright 2001 Other\n")?;
  write_file(tree.path(), "b.cc", "int b;\n")?;
  write_file(tree.path(), "c.cc", "// ---- Copyright End ----\n// ---- Copyright Start ----\n")?;

  let report = processor(tree.path(), RunMode::Ci)?.run()?;

  assert_eq!(report.failures().count(), 3);
  assert_eq!(report.outcome_of(&rel("a.cc")), Some(FileOutcome::Failed(FailureKind::Foreign)));
  assert_eq!(report.outcome_of(&rel("b.cc")), Some(FileOutcome::Failed(FailureKind::Missing)));
  assert_eq!(
    report.outcome_of(&rel("c.cc")),
    Some(FileOutcome::Failed(FailureKind::MarkerOrder))
  );
  Ok(())
}

#[test]
fn test_second_local_run_is_noop() -> Result<()> {
  let tree = setup_tree()?;
  write_file(tree.path(), "src/a.h", "int a;\n")?;
  write_file(
    tree.path(),
    "src/b.py",
    "\"\"\"\n---- Copyright Start ----\nold\n---- Copyright End ----\n\"\"\"\nx = 1\n",
  )?;
  write_file(tree.path(), "CMakeLists.txt", "project(test)\n")?;
  write_file(tree.path(), "proto/msg.proto", "syntax = \"proto3\";\n")?;

  let first = processor(tree.path(), RunMode::Local)?.run()?;
  assert_eq!(first.modified().count(), 4);

  let snapshot: Vec<_> = ["src/a.h", "src/b.py", "CMakeLists.txt", "proto/msg.proto"]
    .iter()
    .map(|f| read_file(tree.path(), f))
    .collect::<Result<_>>()?;

  let second = processor(tree.path(), RunMode::Local)?.run()?;
  assert_eq!(second.modified().count(), 0);
  assert!(
    second
      .files()
      .iter()
      .filter(|f| f.outcome != FileOutcome::Unsupported)
      .all(|f| f.outcome == FileOutcome::Approved)
  );

  let after: Vec<_> = ["src/a.h", "src/b.py", "CMakeLists.txt", "proto/msg.proto"]
    .iter()
    .map(|f| read_file(tree.path(), f))
    .collect::<Result<_>>()?;
  assert_eq!(snapshot, after);

  // A CI run over the fixed tree passes
  assert!(processor(tree.path(), RunMode::Ci)?.run()?.is_success());
  Ok(())
}

#[test]
fn test_cmake_uses_bracket_comment() -> Result<()> {
  let tree = setup_tree()?;
  write_file(tree.path(), "CMakeLists.txt", "cmake_minimum_required(VERSION 3.16)\n")?;

  processor(tree.path(), RunMode::Local)?.run()?;

  assert_eq!(
    read_file(tree.path(), "CMakeLists.txt")?,
    with_block_header("#[[", "]]", "cmake_minimum_required(VERSION 3.16)\n")
  );
  Ok(())
}

#[test]
fn test_excluded_and_unsupported_files_untouched() -> Result<()> {
  let tree = setup_tree()?;
  write_file(tree.path(), "build/generated.h", "int gen;\n")?;
  write_file(tree.path(), "lib/submodules/dep/x.cc", "// Copyright Foreign\n")?;
  write_file(tree.path(), "README.md", "# readme\n")?;

  let report = processor(tree.path(), RunMode::Local)?.run()?;

  assert_eq!(report.outcome_of(&rel("build/generated.h")), Some(FileOutcome::Excluded));
  assert_eq!(
    report.outcome_of(&rel("lib/submodules/dep/x.cc")),
    Some(FileOutcome::Excluded)
  );
  assert_eq!(report.outcome_of(&rel("README.md")), Some(FileOutcome::Unsupported));

  assert_eq!(read_file(tree.path(), "build/generated.h")?, "int gen;\n");
  assert_eq!(read_file(tree.path(), "lib/submodules/dep/x.cc")?, "// Copyright Foreign\n");
  assert_eq!(read_file(tree.path(), "README.md")?, "# readme\n");
  Ok(())
}

#[cfg(unix)]
#[test]
fn test_excluded_file_never_opened_for_writing() -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let tree = setup_tree()?;
  let path = write_file(tree.path(), "obj/locked.h", "int locked;\n")?;
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000))?;

  let report = processor(tree.path(), RunMode::Local)?.run();

  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644))?;
  assert_eq!(report?.outcome_of(&rel("obj/locked.h")), Some(FileOutcome::Excluded));
  assert_eq!(read_file(tree.path(), "obj/locked.h")?, "int locked;\n");
  Ok(())
}

#[test]
fn test_last_matching_rule_wins() -> Result<()> {
  let tree = setup_tree()?;
  write_file(tree.path(), "gen/msg.pb.h", "struct Msg;\n")?;

  let header = CanonicalHeader::load(&tree.path().join(common::HEADER_FILE))?;
  let processor = Processor::new(ProcessorConfig {
    rules: RuleTable::new(vec![
      (".pb.h".to_string(), CommentMarkers::new("//<", "//>")),
      (".h".to_string(), CommentMarkers::new("/*", "*/")),
    ]),
    ..ProcessorConfig::new(tree.path().to_path_buf(), header)
  });
  processor.run()?;

  assert_eq!(
    read_file(tree.path(), "gen/msg.pb.h")?,
    with_block_header("/*", "*/", "struct Msg;\n")
  );
  Ok(())
}

#[test]
fn test_custom_exclusions_replace_defaults() -> Result<()> {
  let tree = setup_tree()?;
  write_file(tree.path(), "build/a.h", "int a;\n")?;
  write_file(tree.path(), "vendor/b.h", "int b;\n")?;

  let header = CanonicalHeader::load(&tree.path().join(common::HEADER_FILE))?;
  let processor = Processor::new(ProcessorConfig {
    exclusions: ExclusionSet::new(&[".*/vendor/.*"])?,
    ..ProcessorConfig::new(tree.path().to_path_buf(), header)
  });
  let report = processor.run()?;

  assert_eq!(report.outcome_of(&rel("build/a.h")), Some(FileOutcome::Inserted));
  assert_eq!(report.outcome_of(&rel("vendor/b.h")), Some(FileOutcome::Excluded));
  Ok(())
}

#[test]
fn test_crlf_sources_match_lf_header() -> Result<()> {
  let tree = setup_tree()?;
  let approved = with_block_header("/*", "*/", "int a;\n").replace('\n', "\r\n");
  write_file(tree.path(), "a.h", &approved)?;
  write_file(
    tree.path(),
    "b.py",
    "\"\"\"\r\n---- Copyright Start ----\r\nold\r\n---- Copyright End ----\r\n\"\"\"\r\nx = 1\r\n",
  )?;

  let report = processor(tree.path(), RunMode::Local)?.run()?;

  assert_eq!(report.outcome_of(&rel("a.h")), Some(FileOutcome::Approved));
  assert_eq!(read_file(tree.path(), "a.h")?, approved);

  assert_eq!(report.outcome_of(&rel("b.py")), Some(FileOutcome::Replaced));
  let rewritten = read_file(tree.path(), "b.py")?;
  assert_eq!(rewritten, format!("\"\"\"\n{HEADER}\n\"\"\"\nx = 1\n"));
  assert!(!rewritten.contains('\r'));
  Ok(())
}
