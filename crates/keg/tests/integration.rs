//! End-to-end CLI integration tests for the `keg` binary.
//!
//! Each test creates its own temporary directory, initializes a keg
//! setup, and exercises the `keg` binary as a subprocess via
//! `assert_cmd`. Everything runs offline: remote fetches are exercised
//! through `file://` URLs.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use sha2::{Digest, Sha256};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

// sha256("hello world\n")
const SHA_HELLO: &str = "a948904f2f0f479b8f8197694b30184b0d2ed1c1cd2a1ec0fb85d299a192a447";

/// Build a `Command` targeting the cargo-built `keg` binary.
///
/// `KEG_*` variables are stripped so a developer's environment cannot
/// leak into the tests.
fn keg(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("keg").unwrap();
    cmd.current_dir(tmp.path())
        .env_remove("KEG_DIR")
        .env_remove("KEG_FORMULAS")
        .env_remove("KEG_CELLAR")
        .env_remove("KEG_CACHE")
        .args(["--keg-dir", &tmp.path().join(".keg").display().to_string()]);
    cmd
}

/// Initialize a fresh keg setup in a temp directory and return the handle.
fn init_keg() -> TempDir {
    let tmp = TempDir::new().unwrap();
    keg(&tmp).args(["init", "--quiet"]).assert().success();
    tmp
}

/// The formulas directory of an initialized setup.
fn formulas_dir(tmp: &TempDir) -> PathBuf {
    tmp.path().join(".keg").join("formulas")
}

/// Write a formula file into the setup's formulas directory.
fn write_formula(tmp: &TempDir, file: &str, content: &str) {
    fs::write(formulas_dir(tmp).join(file), content).unwrap();
}

fn hdf5_formula(version: &str, sha256: &str) -> String {
    format!(
        r#"
name = "hdf5"
version = "{version}"
homepage = "https://www.hdfgroup.org/HDF5/"
url = "https://support.hdfgroup.org/ftp/HDF5/releases/hdf5-{version}/src/hdf5-{version}.tar.bz2"
sha256 = "{sha256}"
"#
    )
}

/// Formula pointing at a local archive via `file://`.
fn local_formula(name: &str, version: &str, archive: &Path, sha256: &str) -> String {
    format!(
        r#"
name = "{name}"
version = "{version}"
url = "file://{}"
sha256 = "{sha256}"
"#,
        archive.display()
    )
}

// ---------------------------------------------------------------------------
// Flow 1: init, list, info
// ---------------------------------------------------------------------------

#[test]
fn flow1_list_and_info() {
    let tmp = init_keg();
    write_formula(&tmp, "hdf5-1.8.16.toml", &hdf5_formula("1.8.16", SHA_HELLO));
    write_formula(&tmp, "hdf5-1.8.19.toml", &hdf5_formula("1.8.19", SHA_HELLO));
    write_formula(
        &tmp,
        "netcdf-4.3.3.1.toml",
        r#"
name = "netcdf"
version = "4.3.3.1"
url = "ftp://ftp.unidata.ucar.edu/pub/netcdf/netcdf-4.3.3.1.tar.gz"
sha256 = "bdde3d8b0e48eed2948ead65f82c5cfb7590313bc32c4cf6c6546e4cea47ba19"
configure_args = ["--disable-netcdf-4"]
"#,
    );

    // Default list shows only the newest hdf5.
    keg(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.8.19"))
        .stdout(predicate::str::contains("netcdf"))
        .stdout(predicate::str::contains("1.8.16").not());

    // --all shows every revision.
    let output = keg(&tmp).args(["list", "--all", "--json"]).output().unwrap();
    assert!(output.status.success());
    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let arr = list.as_array().expect("list --json should return array");
    assert_eq!(arr.len(), 3);

    // info resolves name to the newest version.
    let output = keg(&tmp).args(["info", "hdf5", "--json"]).output().unwrap();
    assert!(output.status.success());
    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["name"], "hdf5");
    assert_eq!(info["version"], "1.8.19");
    assert_eq!(info["algorithm"], "sha256");
    assert_eq!(info["digest"], SHA_HELLO);

    // name@version pins an exact revision.
    keg(&tmp)
        .args(["info", "hdf5@1.8.16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hdf5 1.8.16"))
        .stdout(predicate::str::contains("Versions: 1.8.16, 1.8.19"));

    // The human view previews the fixed build pipeline.
    keg(&tmp)
        .args(["info", "netcdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("./configure --prefix="))
        .stdout(predicate::str::contains("--disable-netcdf-4"))
        .stdout(predicate::str::contains("make install"));
}

#[test]
fn unknown_formula_fails() {
    let tmp = init_keg();
    keg(&tmp)
        .args(["info", "zlib"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown formula"));
}

// ---------------------------------------------------------------------------
// Flow 2: verify
// ---------------------------------------------------------------------------

#[test]
fn flow2_verify_success_and_mismatch() {
    let tmp = init_keg();
    write_formula(&tmp, "hdf5-1.8.19.toml", &hdf5_formula("1.8.19", SHA_HELLO));

    let archive = tmp.path().join("hdf5-1.8.19.tar.bz2");
    fs::write(&archive, b"hello world\n").unwrap();

    keg(&tmp)
        .args(["verify", "hdf5", "--archive", &archive.display().to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK:"));

    // Tampered bytes must fail with a mismatch, not succeed or panic.
    fs::write(&archive, b"hello world!\n").unwrap();
    keg(&tmp)
        .args(["verify", "hdf5", "--archive", &archive.display().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sha256 checksum mismatch"));
}

#[test]
fn malformed_formula_fails_verify_before_reading_archive() {
    let tmp = init_keg();
    // Unrecognized checksum algorithm: load-time failure.
    write_formula(
        &tmp,
        "hdf5-1.8.19.toml",
        r#"
name = "hdf5"
version = "1.8.19"
url = "https://x/hdf5-1.8.19.tar.bz2"
blake3 = "59c03816105d57990329537ad1049ba22c2b8afe1890085f0c022b75f1727238"
"#,
    );
    keg(&tmp)
        .args(["verify", "hdf5", "--archive", "/nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no recognized checksum"));
}

// ---------------------------------------------------------------------------
// Flow 3: fetch via file://
// ---------------------------------------------------------------------------

#[test]
fn flow3_fetch_writes_verified_archive_to_cache() {
    let tmp = init_keg();
    let source = tmp.path().join("pkg-0.1.tar.gz");
    fs::write(&source, b"hello world\n").unwrap();
    write_formula(
        &tmp,
        "pkg-0.1.toml",
        &local_formula("pkg", "0.1", &source, SHA_HELLO),
    );

    let output = keg(&tmp).args(["fetch", "pkg", "--json"]).output().unwrap();
    assert!(
        output.status.success(),
        "fetch failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["formula"], "pkg@0.1");
    assert_eq!(report["bytes"], 12);

    let cached = tmp
        .path()
        .join(".keg")
        .join("cache")
        .join("pkg-0.1.tar.gz");
    assert_eq!(fs::read(cached).unwrap(), b"hello world\n");
}

#[test]
fn fetch_rejects_corrupted_source() {
    let tmp = init_keg();
    let source = tmp.path().join("pkg-0.1.tar.gz");
    fs::write(&source, b"corrupted").unwrap();
    write_formula(
        &tmp,
        "pkg-0.1.toml",
        &local_formula("pkg", "0.1", &source, SHA_HELLO),
    );

    keg(&tmp)
        .args(["fetch", "pkg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("checksum mismatch"));

    // Nothing may land in the cache.
    assert!(!tmp
        .path()
        .join(".keg")
        .join("cache")
        .join("pkg-0.1.tar.gz")
        .exists());
}

// ---------------------------------------------------------------------------
// Flow 4: audit
// ---------------------------------------------------------------------------

#[test]
fn flow4_audit_reports_all_problems() {
    let tmp = init_keg();
    write_formula(&tmp, "hdf5-1.8.19.toml", &hdf5_formula("1.8.19", SHA_HELLO));
    write_formula(
        &tmp,
        "broken.toml",
        "name = \"zlib\"\nversion = \"1.0\"\nurl = \"https://x/zlib-1.0.tar.gz\"\n",
    );
    // Duplicate of the good record under another file name.
    write_formula(&tmp, "hdf5-dup.toml", &hdf5_formula("1.8.19", SHA_HELLO));

    keg(&tmp)
        .arg("audit")
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL"))
        .stdout(predicate::str::contains("no recognized checksum"))
        .stdout(predicate::str::contains("duplicate formula hdf5@1.8.19"))
        .stderr(predicate::str::contains("2 formula file(s) failed audit"));

    let output = keg(&tmp).args(["audit", "--json"]).output().unwrap();
    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["checked"], 3);
    assert_eq!(report["problems"], 2);
}

#[test]
fn audit_passes_on_clean_directory() {
    let tmp = init_keg();
    write_formula(&tmp, "hdf5-1.8.19.toml", &hdf5_formula("1.8.19", SHA_HELLO));
    keg(&tmp)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

// ---------------------------------------------------------------------------
// Flow 5: install (real tar / sh / make)
// ---------------------------------------------------------------------------

/// Build a source tarball whose `configure` writes a Makefile with an
/// `install` target; the pipeline then drives the real tools.
#[cfg(unix)]
fn make_source_tarball(tmp: &TempDir, exit_code: i32) -> (PathBuf, String) {
    let stage = tmp.path().join("stage");
    let src = stage.join("pkg-0.1");
    fs::create_dir_all(&src).unwrap();

    let configure = format!(
        "#!/bin/sh\n\
         prefix=$(echo \"$1\" | sed 's/^--prefix=//')\n\
         printf 'install:\\n\\tmkdir -p %s\\n\\ttouch %s/installed\\n' \"$prefix\" \"$prefix\" > Makefile\n\
         exit {exit_code}\n"
    );
    let configure_path = src.join("configure");
    fs::write(&configure_path, configure).unwrap();

    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(&configure_path, fs::Permissions::from_mode(0o755)).unwrap();

    let archive = tmp.path().join("pkg-0.1.tar.gz");
    let status = std::process::Command::new("tar")
        .args([
            "-czf",
            &archive.display().to_string(),
            "-C",
            &stage.display().to_string(),
            "pkg-0.1",
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let digest = format!("{:x}", Sha256::digest(fs::read(&archive).unwrap()));
    (archive, digest)
}

#[test]
#[cfg(unix)]
fn flow5_install_builds_into_cellar() {
    let tmp = init_keg();
    let (archive, digest) = make_source_tarball(&tmp, 0);
    write_formula(
        &tmp,
        "pkg-0.1.toml",
        &local_formula("pkg", "0.1", &archive, &digest),
    );

    let output = keg(&tmp).args(["install", "pkg", "--json"]).output().unwrap();
    assert!(
        output.status.success(),
        "install failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let prefix = tmp
        .path()
        .join(".keg")
        .join("cellar")
        .join("pkg")
        .join("0.1");
    assert!(prefix.join("installed").exists(), "make install did not run");
}

#[test]
#[cfg(unix)]
fn flow5_failed_configure_aborts_install() {
    let tmp = init_keg();
    let (archive, digest) = make_source_tarball(&tmp, 1);
    write_formula(
        &tmp,
        "pkg-0.1.toml",
        &local_formula("pkg", "0.1", &archive, &digest),
    );

    keg(&tmp)
        .args(["install", "pkg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited with status 1"));

    // make install never ran.
    let prefix = tmp
        .path()
        .join(".keg")
        .join("cellar")
        .join("pkg")
        .join("0.1");
    assert!(!prefix.join("installed").exists());
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

#[test]
fn version_prints_metadata() {
    let tmp = TempDir::new().unwrap();
    keg(&tmp)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("keg version"));
}

#[test]
fn json_errors_are_structured() {
    let tmp = TempDir::new().unwrap();
    // No keg dir and no --formulas: listing must fail with a JSON error.
    let mut cmd = Command::cargo_bin("keg").unwrap();
    let output = cmd
        .current_dir(tmp.path())
        .env_remove("KEG_DIR")
        .env_remove("KEG_FORMULAS")
        .env("HOME", tmp.path())
        .args(["--keg-dir", &tmp.path().join(".keg").display().to_string()])
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(err["error"].is_string());
}
