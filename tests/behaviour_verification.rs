//! Behaviour-driven tests for installed asset verification.
//!
//! These scenarios install a compiled distribution and then exercise the
//! verifier against intact, tampered, and missing assets. Tests use the
//! rstest-bdd v0.5.0 mutable world pattern.

use camino::{Utf8Path, Utf8PathBuf};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs;
use tempfile::TempDir;
use windlass::compiler::{CompileOptions, compile};
use windlass::dirs::BaseDirs;
use windlass::error::WindlassError;
use windlass::installer::install;
use windlass::verifier::{VerifyOutcome, Whitelist, verify};

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

/// Test double returning a fixed per-user data directory.
struct FixedDirs {
    data_dir: Utf8PathBuf,
}

impl BaseDirs for FixedDirs {
    fn data_dir(&self) -> Option<Utf8PathBuf> {
        Some(self.data_dir.clone())
    }
}

#[derive(Default)]
struct VerificationWorld {
    temp_dir: Option<TempDir>,
    root: Option<Utf8PathBuf>,
    tampered: Option<Tampered>,
    outcome: Option<VerifyOutcome>,
    error: Option<WindlassError>,
}

/// What a tampering step did to an installed asset.
struct Tampered {
    file_name: String,
    catalogued_size: u64,
    actual_size: u64,
}

#[fixture]
fn world() -> VerificationWorld {
    VerificationWorld {
        temp_dir: Some(TempDir::new().expect("temp dir")),
        ..VerificationWorld::default()
    }
}

/// Return the temp directory as a UTF-8 path.
fn temp_path(world: &VerificationWorld) -> Utf8PathBuf {
    let path = world.temp_dir.as_ref().expect("temp_dir set").path();
    Utf8PathBuf::from_path_buf(path.to_path_buf()).expect("UTF-8 temp dir")
}

fn write_file(path: &Utf8Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, bytes).expect("write file");
}

/// Seed, compile, and install the standard tree, returning the install root.
///
/// The tree catalogues three files; `haloce.exe` and `maps/a10.map` carry
/// whitelisted extensions while `readme.txt` does not.
fn install_distribution(world: &VerificationWorld) -> Utf8PathBuf {
    let base = temp_path(world);
    let source = base.join("game");
    write_file(&source.join("haloce.exe"), b"executable bytes");
    write_file(&source.join("maps/a10.map"), b"canyon terrain");
    write_file(&source.join("readme.txt"), b"patch notes");

    let dist = base.join("dist");
    let options = CompileOptions {
        copy_executable: false,
    };
    compile(&source, &dist, &options).expect("compile distribution");

    let target = base.join("install");
    let dirs = FixedDirs {
        data_dir: base.join("data"),
    };
    install(&dist, &target, &dirs).expect("install distribution");
    target
}

/// Resolve an installed asset path from its slash-separated name.
fn installed_asset(world: &VerificationWorld, name: &str) -> Utf8PathBuf {
    world.root.as_ref().expect("root set").join(name)
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("an installed distribution")]
fn given_installed_distribution(world: &mut VerificationWorld) {
    world.root = Some(install_distribution(world));
}

#[given("an installation root with no manifest")]
fn given_bare_root(world: &mut VerificationWorld) {
    let root = temp_path(world).join("install");
    fs::create_dir_all(&root).expect("mkdir install root");
    world.root = Some(root);
}

#[given("the asset \"{name}\" is truncated")]
fn given_asset_truncated(world: &mut VerificationWorld, name: String) {
    let path = installed_asset(world, &name);
    let catalogued_size = fs::metadata(&path).expect("installed asset").len();
    fs::write(&path, b"xx").expect("truncate asset");
    let file_name = name.rsplit('/').next().expect("file name").to_owned();
    world.tampered = Some(Tampered {
        file_name,
        catalogued_size,
        actual_size: 2,
    });
}

#[given("the asset \"{name}\" is deleted")]
fn given_asset_deleted(world: &mut VerificationWorld, name: String) {
    let path = installed_asset(world, &name);
    fs::remove_file(&path).expect("delete asset");
    let file_name = name.rsplit('/').next().expect("file name").to_owned();
    world.tampered = Some(Tampered {
        file_name,
        catalogued_size: 0,
        actual_size: 0,
    });
}

#[when("the assets are verified")]
fn when_verified(world: &mut VerificationWorld) {
    let root = world.root.as_ref().expect("root set");
    match verify(root, &Whitelist::default()) {
        Ok(outcome) => world.outcome = Some(outcome),
        Err(e) => world.error = Some(e),
    }
}

#[then("verification passes with {count} checked assets")]
fn then_verification_passes(world: &mut VerificationWorld, count: usize) {
    if let Some(error) = &world.error {
        panic!("verification failed: {error}");
    }
    let outcome = world.outcome.as_ref().expect("outcome set");
    assert_eq!(*outcome, VerifyOutcome::Verified { checked: count });
}

#[then("verification fails citing the asset and both sizes")]
fn then_verification_cites_sizes(world: &mut VerificationWorld) {
    let tampered = world.tampered.as_ref().expect("tampering step ran");
    let error = world.error.as_ref().expect("expected a verification error");
    match error {
        WindlassError::AssetMismatch {
            name,
            expected,
            actual,
        } => {
            assert_eq!(name.as_str(), tampered.file_name);
            assert_eq!(*expected, tampered.catalogued_size);
            assert_eq!(*actual, tampered.actual_size);
        }
        other => panic!("expected AssetMismatch, got {other:?}"),
    }
    let message = error.to_string();
    assert!(
        message.contains(&tampered.file_name),
        "message must name the asset: {message}"
    );
}

#[then("verification fails because the asset is missing")]
fn then_verification_missing_asset(world: &mut VerificationWorld) {
    let tampered = world.tampered.as_ref().expect("deletion step ran");
    let error = world.error.as_ref().expect("expected a verification error");
    match error {
        WindlassError::AssetMissing { name, .. } => {
            assert_eq!(name.as_str(), tampered.file_name);
        }
        other => panic!("expected AssetMissing, got {other:?}"),
    }
}

#[then("verification is skipped")]
fn then_verification_skipped(world: &mut VerificationWorld) {
    if let Some(error) = &world.error {
        panic!("verification failed: {error}");
    }
    let outcome = world.outcome.as_ref().expect("outcome set");
    assert_eq!(*outcome, VerifyOutcome::Skipped);
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/verification.feature",
    name = "A fresh installation verifies clean"
)]
fn scenario_fresh_install_clean(world: VerificationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/verification.feature",
    name = "Tampering with a map asset fails verification"
)]
fn scenario_tampered_map(world: VerificationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/verification.feature",
    name = "Deleting a catalogued asset fails verification"
)]
fn scenario_deleted_asset(world: VerificationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/verification.feature",
    name = "Verification without a manifest is skipped"
)]
fn scenario_no_manifest_skipped(world: VerificationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/verification.feature",
    name = "Assets outside the whitelist are not checked"
)]
fn scenario_whitelist_only(world: VerificationWorld) {
    let _ = world;
}
