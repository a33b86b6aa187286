use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn phone_is_grouped() {
    cargo_bin_cmd!("stayviewctl")
        .args(["links", "phone", "+9607860882"])
        .assert()
        .success()
        .stdout("+960 786 0882\n");
}

#[test]
fn whatsapp_uses_configured_number() {
    let dir = TempDir::new().unwrap();
    cargo_bin_cmd!("stayviewctl")
        .args(["--no-dotenv", "--root"])
        .arg(dir.path())
        .args(["links", "whatsapp", "--message", "Room for 2?"])
        .env_remove("STAYVIEW_CONFIG_PATH")
        .env_remove("STAYVIEW_CONFIG_JSON")
        .env_remove("STAYVIEW_WHATSAPP_NUMBER")
        .assert()
        .success()
        .stdout(predicate::eq("https://wa.me/9607860882?text=Room%20for%202%3F\n"));
}

#[test]
fn booking_link_merges_dates() {
    cargo_bin_cmd!("stayviewctl")
        .args([
            "links",
            "booking",
            "--base",
            "https://www.booking.com/hotel/mv/tour-inn.html?aid=304142",
            "--checkin",
            "2026-01-10",
            "--checkout",
            "2026-01-12",
            "--adults",
            "2",
            "--age",
            "5",
            "--age",
            "9",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "aid=304142&checkin=2026-01-10&checkout=2026-01-12&group_adults=2&age=5&age=9",
        ));
}

#[test]
fn strict_booking_rejects_inverted_stay() {
    cargo_bin_cmd!("stayviewctl")
        .args([
            "links",
            "booking",
            "--base",
            "https://www.booking.com/hotel/mv/tour-inn.html",
            "--checkin",
            "2026-01-12",
            "--checkout",
            "2026-01-10",
            "--strict",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("before check-in"));
}
