use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn cities_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs/cities")
}

fn bin(name: &str) -> Command {
    let mut cmd = Command::cargo_bin(name).expect("binary built");
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn prayer_times_prints_baku_solstice() {
    bin("prayer_times")
        .args([
            "--lat", "40.4093", "--lon", "49.8671", "--tz", "4", "--date", "2024-06-21",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Fajr     03:23:29")
                .and(predicate::str::contains("Sunrise  05:10:50"))
                .and(predicate::str::contains("Dhuhr    12:42:40"))
                .and(predicate::str::contains("Maghrib  20:30:28"))
                .and(predicate::str::contains("Isha     21:45:21"))
                .and(predicate::str::contains("Friday, 21 June 2024")),
        );
}

#[test]
fn prayer_times_offset_moves_the_date() {
    bin("prayer_times")
        .args([
            "--lat", "40.4093", "--lon", "49.8671", "--tz", "4", "--date", "2024-06-22",
            "--offset", "-1", "--format", "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-06-21,03:23:29"));
}

#[test]
fn prayer_times_writes_csv_for_a_city() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("week.csv");
    bin("prayer_times")
        .args(["--city", "BAKU", "--cities"])
        .arg(cities_dir())
        .args(["--date", "2024-06-21", "--days", "7", "--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success();

    let mut reader = csv::Reader::from_path(&output).expect("csv output");
    assert_eq!(
        reader.headers().expect("headers").iter().collect::<Vec<_>>(),
        ["date", "fajr", "sunrise", "dhuhr", "asr", "sunset", "maghrib", "isha", "midnight"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 7);
    assert_eq!(&rows[0][3], "12:42:40");
    assert_eq!(&rows[6][0], "2024-06-27");
}

#[test]
fn prayer_times_json_names_the_city() {
    bin("prayer_times")
        .args(["--city", "istanbul", "--cities"])
        .arg(cities_dir())
        .args(["--date", "2024-03-20", "--format", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"city\": \"Istanbul\"")
                .and(predicate::str::contains("\"timezone_hours\": 3.0")),
        );
}

#[test]
fn prayer_times_rejects_bad_input() {
    bin("prayer_times")
        .args(["--lat", "95", "--lon", "0", "--date", "2024-06-21"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("latitude 95"));

    bin("prayer_times")
        .args(["--city", "atlantis", "--cities"])
        .arg(cities_dir())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown city"));

    bin("prayer_times")
        .args(["--lat", "40", "--lon", "49", "--fajr-angle", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fajr_angle"));
}

#[test]
fn prayer_times_warns_inside_polar_circle() {
    bin("prayer_times")
        .args([
            "--lat", "80", "--lon", "0", "--tz", "0", "--date", "2024-06-21",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fajr"))
        .stderr(predicate::str::contains("inside a polar circle"));
}

#[test]
fn prayer_times_warns_when_a_later_day_is_out_of_order() {
    let args = [
        "--lat", "62", "--lon", "0", "--tz", "2", "--date", "2024-05-20", "--format", "csv",
    ];
    bin("prayer_times")
        .args(args)
        .args(["--days", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("out of order").not());

    bin("prayer_times")
        .args(args)
        .args(["--days", "30"])
        .assert()
        .success()
        .stderr(predicate::str::contains("out of order for some dates"));
}

#[test]
fn qibla_reports_bearing_and_turn() {
    bin("qibla")
        .args(["--lat", "40.4093", "--lon", "49.8671", "--heading", "90"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("207.18")
                .and(predicate::str::contains("SSW"))
                .and(predicate::str::contains("117.18")),
        );
}

#[test]
fn qaza_counters_persist_between_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = dir.path().join("settings.json");
    let run = |args: &[&str]| {
        let mut cmd = bin("qaza");
        cmd.arg("--store").arg(&store).args(args);
        cmd
    };

    run(&["add", "fajr", "3"]).assert().success();
    run(&["remove", "fajr"]).assert().success();
    run(&["add", "asr", "--safar"]).assert().success();
    run(&["show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Fajr          2")
                .and(predicate::str::contains("Safar Asr     1"))
                .and(predicate::str::contains("Total           3")),
        );

    run(&[
        "estimate", "--start", "2024-01-01", "--today", "2024-03-01", "--apply",
    ])
    .assert()
    .success()
    .stdout(
        predicate::str::contains("total prayers 300")
            .and(predicate::str::contains("Fajr          60")),
    );

    run(&["estimate", "--start", "2030-01-01", "--today", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("in the future"));

    run(&["add", "witr"]).assert().failure();
}

#[test]
fn tasbeeh_advances_phases() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = dir.path().join("settings.json");

    bin("tasbeeh")
        .arg("--store")
        .arg(&store)
        .args(["tap", "33"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Next: Alhamdulillah")
                .and(predicate::str::contains("Phase 2/3")),
        );

    bin("tasbeeh")
        .arg("--store")
        .arg(&store)
        .args(["tap", "70"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Tasbeeh complete")
                .and(predicate::str::contains("Total 100/100")),
        );

    bin("tasbeeh")
        .arg("--store")
        .arg(&store)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Phase 1/3: Subhanallah"));
}

#[test]
fn quran_offline_serves_bundled_chapters() {
    bin("quran")
        .args(["--offline", "translation", "112"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4. Nor is there to Him any equivalent."));

    bin("quran")
        .args(["--offline", "chapters"])
        .assert()
        .success()
        .stdout(predicate::str::contains("114. An-Naas"));

    bin("quran")
        .args(["--offline", "text", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chapter 200"));
}
