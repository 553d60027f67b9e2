use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
    time::{SystemTime, UNIX_EPOCH},
};

fn scratch_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "micromouse-cli-{label}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("scratch directory");
    dir
}

fn micromouse(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_micromouse"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run micromouse binary")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[test]
fn new_check_set_wall_and_print() {
    let dir = scratch_dir("flow");
    let file = dir.join("run.maze");
    let file = path_arg(&file);

    let created = micromouse(&["new", file]);
    assert!(created.status.success(), "new failed: {created:?}");
    let text = fs::read_to_string(file).expect("maze written");
    assert!(text.starts_with("micromouse:v1\n"));
    assert!(text.contains("goal:8,8"));

    let checked = micromouse(&["check", file]);
    assert!(checked.status.success(), "check failed: {checked:?}");
    assert!(String::from_utf8_lossy(&checked.stdout).contains(": ok,"));

    let edited = micromouse(&["set-wall", file, "0,0", "C", "present"]);
    assert!(edited.status.success(), "set-wall failed: {edited:?}");

    let printed = micromouse(&["print", file]);
    assert!(printed.status.success(), "print failed: {printed:?}");
    let stdout = String::from_utf8(printed.stdout).expect("ascii printout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 33);
    assert!(lines[0].starts_with("+--+--+"));
    assert!(lines[31].starts_with("| M|"), "row 0 shows mouse and wall");

    fs::remove_dir_all(&dir).expect("clean up scratch directory");
}

#[test]
fn config_can_hide_the_mouse() {
    let dir = scratch_dir("config");
    let file = dir.join("run.maze");
    let config = dir.join("micromouse.toml");
    fs::write(&config, "version = 1\n\n[render]\nshow_mouse = false\n").expect("config written");

    let created = micromouse(&["new", path_arg(&file)]);
    assert!(created.status.success(), "new failed: {created:?}");

    let printed = micromouse(&["--config", path_arg(&config), "print", path_arg(&file)]);
    assert!(printed.status.success(), "print failed: {printed:?}");
    let stdout = String::from_utf8_lossy(&printed.stdout);
    assert!(!stdout.contains('M'));
    assert!(stdout.contains(" S"));

    fs::remove_dir_all(&dir).expect("clean up scratch directory");
}

#[test]
fn boundary_walls_cannot_be_opened() {
    let dir = scratch_dir("boundary");
    let file = dir.join("run.maze");
    let file = path_arg(&file);
    assert!(micromouse(&["new", file]).status.success());

    let rejected = micromouse(&["set-wall", file, "0,0", "r", "empty"]);
    assert!(!rejected.status.success());
    assert!(String::from_utf8_lossy(&rejected.stderr).contains("cannot update"));

    fs::remove_dir_all(&dir).expect("clean up scratch directory");
}

#[test]
fn check_rejects_a_malformed_file() {
    let dir = scratch_dir("malformed");
    let file = dir.join("broken.maze");
    fs::write(&file, "micromouse:v1\nsize:3x3\n").expect("file written");

    let checked = micromouse(&["check", path_arg(&file)]);
    assert!(!checked.status.success());
    assert!(String::from_utf8_lossy(&checked.stderr).contains("failed to load maze"));

    fs::remove_dir_all(&dir).expect("clean up scratch directory");
}
