use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SHEET: &str = "\
# Turkish Cargo - Export rates

Rates are valid from 01/02/2024 until 28/02/2024.

| Origin | Destination | Min | <45 | >45 |
|--------|-------------|-----|-----|-----|
| FRA | IST | 10,50 | 5,20 | 4,10 |
| MUC | ESB | 12,00 | 6,10 | 4,90 |
| BER | n/a |
";

fn ratex(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ratex").unwrap();
    // Keep the user's config file out of the tests
    cmd.arg("--config").arg(dir.path().join("config.json"));
    cmd
}

fn write_sheet(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn init_config(dir: &TempDir) {
    ratex(dir).args(["config", "init"]).assert().success();
}

#[test]
fn convert_writes_named_spreadsheet() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = write_sheet(&dir, "sheet.md", SHEET);
    let out = dir.path().join("out");

    ratex(&dir)
        .arg("convert")
        .arg(&input)
        .args(["--airline", "Turkish", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Turkish_010224-280224.xlsx"));

    assert!(out.join("Turkish_010224-280224.xlsx").exists());
}

#[test]
fn convert_csv_rows() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = write_sheet(&dir, "sheet.md", SHEET);

    ratex(&dir)
        .arg("convert")
        .arg(&input)
        .args(["-a", "Pegasus", "-f", "csv", "-o"])
        .arg(dir.path())
        .assert()
        .success();

    let content =
        std::fs::read_to_string(dir.path().join("Pegasus_010224-280224.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Pegasus,FRA,IST,General Cargo,10.50,5.20,4.10,,,,,EUR"));
    assert!(lines[2].starts_with("Pegasus,MUC,ESB"));
}

#[test]
fn convert_without_dates_uses_unknown_date() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = write_sheet(
        &dir,
        "nodates.txt",
        "| Origin | Destination | Min | <45 | >45 |\n| FRA | IST | 1 | 2 | 3 |\n",
    );

    ratex(&dir)
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Turkish_unknown_date-unknown_date.xlsx"));
}

#[test]
fn convert_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = write_sheet(&dir, "sheet.md", SHEET);
    let out = dir.path().join("out");

    ratex(&dir)
        .arg("convert")
        .arg(&input)
        .arg("--dry-run")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rates (2 rows, 1 skipped)"))
        .stdout(predicate::str::contains("FRA -> IST"));

    assert!(!out.exists());
}

#[test]
fn convert_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    ratex(&dir)
        .arg("convert")
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn convert_unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = write_sheet(&dir, "sheet.docx", SHEET);

    ratex(&dir)
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported document format"));
}

#[test]
fn batch_converts_all_documents() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    write_sheet(&dir, "feb.md", SHEET);
    write_sheet(
        &dir,
        "mar.md",
        &SHEET.replace("01/02/2024", "01/03/2024").replace("28/02/2024", "31/03/2024"),
    );
    let out = dir.path().join("out");

    ratex(&dir)
        .arg("batch")
        .arg(format!("{}/*.md", dir.path().display()))
        .args(["-f", "json", "--summary", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    assert!(out.join("Turkish_010224-280224.json").exists());
    assert!(out.join("Turkish_010324-310324.json").exists());

    let summary = std::fs::read_to_string(out.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 3);
}

#[test]
fn batch_same_window_keeps_every_document() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = dir.path().join("in");
    std::fs::create_dir(&input).unwrap();
    std::fs::write(input.join("europe.md"), SHEET).unwrap();
    std::fs::write(
        input.join("asia.md"),
        SHEET.replace("| FRA | IST |", "| VIE | SAW |"),
    )
    .unwrap();
    let out = dir.path().join("out");

    ratex(&dir)
        .arg("batch")
        .arg(format!("{}/*.md", input.display()))
        .args(["-f", "csv", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 0 failed"));

    // asia.md sorts first and takes the plain name
    let plain = std::fs::read_to_string(out.join("Turkish_010224-280224.csv")).unwrap();
    let renamed = std::fs::read_to_string(out.join("Turkish_010224-280224_europe.csv")).unwrap();
    assert!(plain.contains("Turkish,VIE,SAW"));
    assert!(!plain.contains("FRA"));
    assert!(renamed.contains("Turkish,FRA,IST"));
}

#[test]
fn config_set_changes_defaults() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let input = write_sheet(&dir, "sheet.md", SHEET);

    ratex(&dir)
        .args(["config", "set", "output.default_airline", "Lufthansa"])
        .assert()
        .success();
    ratex(&dir)
        .args(["config", "get", "output.default_airline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Lufthansa\""));

    ratex(&dir)
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Lufthansa_010224-280224.xlsx"));
}

#[test]
fn config_set_rejects_invalid_value() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    ratex(&dir)
        .args(["config", "set", "extraction.min_cells", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_cells must be at least 4"));
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    ratex(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
