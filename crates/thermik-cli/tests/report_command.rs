use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use serde_json::{Value, json};

struct Snapshot {
    dir: tempfile::TempDir,
}

impl Snapshot {
    /// Four flights of two pilots, ranked on duration only.
    ///
    /// Durations 1200/2400/3600/4800 put the median at rank 2, so flight 102
    /// scores 0.0, flights 101 and 103 score 50.0 and flight 104 scores 100.0.
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("stats")).unwrap();
        fs::create_dir(root.join("comments")).unwrap();

        let flights = json!([
            flight("101", 1, "Anna", "Berg", "2024-05-01 11:00:00", 1200, "Schauinsland", 1),
            flight("102", "2", "Ben", "Kurz", "2024-05-02 13:00:00", 2400, "Kandel", 0),
            flight("103", 1, "Anna", "Berg", "2024-05-03 10:30:00", 3600, "Lindenberg", 0),
            flight("104", "2", "Ben", "Kurz", "2024-05-04 09:15:00", 4800, "Kandel", 0),
        ]);
        write_json(&root.join("flights.json"), &flights);

        write_stats(root, "101", 80, 40, &["A1", "B2"]);
        write_stats(root, "102", 5, 5, &["A1"]);
        write_stats(root, "103", 30, 10, &["B2", "C3"]);
        write_stats(root, "104", 0, 0, &[]);

        write_json(
            &root.join("comments/101.comments.json"),
            &json!({ "data": [
                { "FKAuthor": "9", "CommentText": "Nice hike!" },
                { "FKAuthor": 1, "CommentText": "Hike and fly, great day" }
            ]}),
        );

        fs::write(
            root.join("thermik.toml"),
            "categories = [\"duration\"]\n\n[score_adjustments]\n\"2\" = 3\n",
        )
        .unwrap();

        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run(&self, mode: &str, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_thermik"))
            .arg(mode)
            .arg(self.path("flights.json"))
            .arg("--stats-dir")
            .arg(self.path("stats"))
            .arg("--comments-dir")
            .arg(self.path("comments"))
            .arg("--config")
            .arg(self.path("thermik.toml"))
            .args(extra)
            .output()
            .unwrap()
    }
}

#[expect(clippy::too_many_arguments)]
fn flight(
    id: &str,
    pilot: impl Into<Value>,
    first: &str,
    last: &str,
    start: &str,
    duration: i64,
    takeoff: &str,
    comments: i64,
) -> Value {
    json!({
        "IDFlight": id,
        "FKPilot": pilot.into(),
        "FirstName": first,
        "LastName": last,
        "FlightDate": &start[..10],
        "FlightStartTime": start,
        "FlightDuration": duration.to_string(),
        "TakeoffWaypointName": takeoff,
        "MaxAltitude": 1500,
        "MaxSpeed": "12.5",
        "BestTaskSpeed": 6.0,
        "MaxClimb": 3.1,
        "MinClimb": "-2.4",
        "BestTaskPoints": 20,
        "CountComments": comments,
        "HasPhotos": 0
    })
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn write_stats(root: &Path, id: &str, left: u32, right: u32, sectors: &[&str]) {
    write_json(
        &root.join(format!("stats/{id}.stats.json")),
        &json!({ "left_turns": left, "right_turns": right, "sektoren": sectors }),
    );
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_report_writes_bundles_and_csv() {
    let snapshot = Snapshot::new();
    let out_dir = snapshot.path("out");
    let csv_path = snapshot.path("flights.csv");
    let output = snapshot.run(
        "report",
        &[
            "--output-dir",
            out_dir.to_str().unwrap(),
            "--csv",
            csv_path.to_str().unwrap(),
        ],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let index = read_json(&out_dir.join("data.json"));
    assert_eq!(index["flight_count"], 4);
    assert_eq!(index["latest_flight"], "2024-05-04 09:15:00");

    let pilots = index["pilots"].as_array().unwrap();
    assert_eq!(pilots.len(), 2);
    assert_eq!(pilots[0]["rank"], 1);
    assert_eq!(pilots[0]["pilot_id"], "2");
    assert_eq!(pilots[0]["best_flight"]["id"], "102");
    assert_eq!(pilots[0]["best_flight"]["score"], 0.0);
    assert_eq!(pilots[0]["stats"]["bonus"], 3);
    assert_eq!(pilots[1]["pilot_id"], "1");
    assert_eq!(pilots[1]["best_flight"]["id"], "101");
    assert_eq!(pilots[1]["best_flight"]["score"], 50.0);
    assert_eq!(pilots[1]["stats"]["hikes"], 1);

    assert_eq!(index["median_stats"]["categories"][0]["value"], 3600.0);
    assert_eq!(index["median_stats"]["pretty_duration"], "1 h 0 min");

    // Only Anna has more than 100 turns.
    assert_eq!(
        index["turn_stats"]["max_absolute_left"]["name"],
        "Anna Berg"
    );
    assert_eq!(index["turn_stats"]["max_absolute_left"]["value"], 60);

    let sectors = index["sectors"].as_array().unwrap();
    assert_eq!(sectors.len(), 3);
    assert_eq!(sectors[0], json!({ "sector": "A1", "flights": 2, "pilots": 2 }));
    assert_eq!(sectors[1], json!({ "sector": "B2", "flights": 2, "pilots": 1 }));

    let anna = read_json(&out_dir.join("pilot1.json"));
    assert_eq!(anna["rank"], 2);
    let flights = anna["flights"].as_array().unwrap();
    assert_eq!(flights.len(), 2);
    assert_eq!(flights[0]["new_sectors"], "A1 B2");
    assert_eq!(flights[1]["new_sectors"], "C3");
    assert_eq!(flights[0]["url"], "https://de.dhv-xc.de/flight/101");
    assert!(out_dir.join("pilot2.json").is_file());

    let csv = fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert!(
        lines
            .next()
            .unwrap()
            .starts_with("pilot_id,name,n,id,date,site,duration_seconds,new_sectors")
    );
    assert_eq!(lines.count(), 4);
}

#[test]
fn test_missing_stats_file_fails_the_run() {
    let snapshot = Snapshot::new();
    fs::remove_file(snapshot.path("stats/103.stats.json")).unwrap();
    let out_dir = snapshot.path("out");
    let output = snapshot.run("report", &["--output-dir", out_dir.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing stats for flight 103"), "stderr: {stderr}");
    assert!(!out_dir.join("data.json").exists());
}

#[test]
fn test_leaderboard_prints_ranking() {
    let snapshot = Snapshot::new();
    let output = snapshot.run("leaderboard", &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let ben = stdout.find("Ben Kurz").unwrap();
    let anna = stdout.find("Anna Berg").unwrap();
    assert!(ben < anna);
    assert!(stdout.contains("Turn statistics (pilots with more than 100 turns)"));
}

#[test]
fn test_leaderboard_json_to_stdout() {
    let snapshot = Snapshot::new();
    let output = snapshot.run("leaderboard", &["--json", "-"]);
    assert!(output.status.success());

    let ranked: Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids = ranked
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["pilot_id"].as_str().unwrap().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(ids, ["2", "1"]);
}
