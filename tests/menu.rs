use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

// Runs the binary inside `work` with `HOME` pointing at `home`, so neither a
// local nor a user config file is picked up.
fn keeper(work: &Path, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rusty-keeper").unwrap();
    cmd.current_dir(work).env("HOME", home);
    cmd
}

fn dirs() -> (TempDir, TempDir) {
    (tempdir().unwrap(), tempdir().unwrap())
}

#[test]
fn exit_choice_ends_with_status_zero() {
    let (work, home) = dirs();

    keeper(work.path(), home.path())
        .write_stdin("5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Backup Directory"))
        .stdout(predicate::str::contains("5. Exit"))
        .stdout(predicate::str::ends_with("Exiting...\n"));
}

#[test]
fn closed_stdin_is_a_normal_exit() {
    let (work, home) = dirs();

    keeper(work.path(), home.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exiting..."));
}

#[test]
fn backup_copies_nested_files() -> Result<(), Box<dyn std::error::Error>> {
    let (work, home) = dirs();
    let source = work.path().join("src");
    let destination = work.path().join("dst");
    fs::create_dir_all(source.join("a"))?;
    fs::create_dir_all(&destination)?;
    fs::write(source.join("a/b.txt"), "hi")?;

    let input = format!("1\n{}\n{}\n5\n", source.display(), destination.display());
    keeper(work.path(), home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Backup completed successfully from '{}' to '{}'.",
            source.display(),
            destination.display()
        )));

    assert_eq!(fs::read_to_string(destination.join("a/b.txt"))?, "hi");
    Ok(())
}

#[test]
fn backup_with_missing_source_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let (work, home) = dirs();
    let destination = work.path().join("dst");
    fs::create_dir_all(&destination)?;

    let input = format!("1\nnowhere\n{}\n5\n", destination.display());
    keeper(work.path(), home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Source directory 'nowhere' does not exist.",
        ));

    assert_eq!(fs::read_dir(&destination)?.count(), 0);
    Ok(())
}

#[test]
fn archive_zip_lands_in_home() -> Result<(), Box<dyn std::error::Error>> {
    let (work, home) = dirs();
    fs::create_dir_all(work.path().join("data"))?;
    fs::write(work.path().join("data/notes.txt"), "remember")?;

    let expected = home.path().join("mybackup.zip");
    keeper(work.path(), home.path())
        .write_stdin("2\ndata\nzip\nmybackup\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Archive created successfully at '{}'.",
            expected.display()
        )));

    let archive = zip::ZipArchive::new(File::open(&expected)?)?;
    assert!(archive.file_names().any(|name| name == "notes.txt"));
    Ok(())
}

#[test]
fn archive_rejects_unknown_type() {
    let (work, home) = dirs();
    fs::create_dir_all(work.path().join("data")).unwrap();

    keeper(work.path(), home.path())
        .write_stdin("2\ndata\nrar\nmybackup\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Invalid archive type 'rar'. Valid types are: zip, gztar, tar, bztar, xztar.",
        ));

    assert_eq!(fs::read_dir(home.path()).unwrap().count(), 0);
}

#[test]
fn large_zip_entries_are_listed() -> Result<(), Box<dyn std::error::Error>> {
    let (work, home) = dirs();
    let path = work.path().join("sample.zip");
    {
        let mut zip = zip::ZipWriter::new(File::create(&path)?);
        let options = zip::write::SimpleFileOptions::default();
        zip.set_comment("Linux");
        zip.start_file("small.txt", options)?;
        zip.write_all(b"small")?;
        zip.start_file("large.bin", options)?;
        zip.write_all(&[1u8; 3000])?;
        zip.finish()?;
    }

    keeper(work.path(), home.path())
        .write_stdin("3\nsample.zip\n2\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created by: Linux\n"))
        .stdout(predicate::str::contains("large.bin: 2.93 KB\n"))
        .stdout(predicate::str::contains("small.txt").not());
    Ok(())
}

#[test]
fn non_numeric_threshold_does_not_crash() {
    let (work, home) = dirs();
    fs::write(work.path().join("sample.zip"), "not a zip").unwrap();

    keeper(work.path(), home.path())
        .write_stdin("3\nsample.zip\nbig\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Invalid size threshold 'big': expected a whole number of kilobytes.",
        ))
        .stdout(predicate::str::ends_with("Exiting...\n"));
}

#[test]
fn recent_files_in_current_directory() {
    let (work, home) = dirs();
    fs::write(work.path().join("today.txt"), "fresh").unwrap();

    keeper(work.path(), home.path())
        .write_stdin("4\n\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("today.txt - Last modified: "));
}

#[test]
fn explicit_config_must_exist() {
    let (work, home) = dirs();

    keeper(work.path(), home.path())
        .args(["--config", "missing.conf"])
        .write_stdin("5\n")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn config_file_redirects_archives() -> Result<(), Box<dyn std::error::Error>> {
    let (work, home) = dirs();
    let target = work.path().join("archives");
    fs::create_dir_all(&target)?;
    fs::create_dir_all(work.path().join("data"))?;
    fs::write(work.path().join("data/x.txt"), "x")?;
    fs::write(
        work.path().join("rusty-keeper.conf"),
        format!("archive_directory = {}\n", target.display()),
    )?;

    keeper(work.path(), home.path())
        .write_stdin("2\ndata\ntar\nnightly\n5\n")
        .assert()
        .success();

    assert!(target.join("nightly.tar").is_file());
    assert!(!home.path().join("nightly.tar").exists());
    Ok(())
}

#[test]
fn archiving_home_into_home_leaves_the_archive_out() -> Result<(), Box<dyn std::error::Error>> {
    let (work, home) = dirs();
    fs::write(home.path().join("letter.txt"), "dear")?;

    let input = format!("2\n{}\nzip\nhome\n5\n", home.path().display());
    keeper(work.path(), home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created successfully"));

    let archive = zip::ZipArchive::new(File::open(home.path().join("home.zip"))?)?;
    let names: Vec<&str> = archive.file_names().collect();
    assert_eq!(names, vec!["letter.txt"]);
    Ok(())
}
