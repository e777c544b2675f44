use anyhow::Result;
use serde_json::Value;
use tunemap::geo::GeoResult;

use crate::{CliTest, run, stderr, stdout};

const SHEET: &str = "\
Titel,Proveniens,Landskap,Låttyp eller visgenre,Sång  instrument,Inspelat/ inlämnat av
Polska efter Lapp-Nils,Habo,Västergötland,Polska,Fiol,Adin Björn
Vallvisa,Habo,Västergötland,\"Visa, vallåt\",Sång,
Okänd låt,Atlantis,Dalsland,,,
Utan ort,,,,,
";

fn seeded_project() -> Result<CliTest> {
    let test = CliTest::with_boundaries()?;
    test.write_file("hitta-folkmusiken.csv", SHEET)?;
    test.seed_cache(
        "loc.cache",
        &[
            (
                "Habo, Västergötland",
                vec![GeoResult::new(57.91, 14.07, "Habo, Sweden")],
            ),
            (
                "Atlantis, Dalsland",
                vec![GeoResult::new(40.0, -30.0, "Atlantis, Dalsland")],
            ),
            ("Atlantis", vec![GeoResult::new(41.0, -31.0, "Atlantis")]),
        ],
    )?;
    Ok(test)
}

fn read_output(test: &CliTest) -> Result<Value> {
    Ok(serde_json::from_str(&test.read_file("public/hitta.json")?)?)
}

#[test]
fn test_build_groups_rows_by_place() -> Result<()> {
    let test = seeded_project()?;

    let output = run({
        let mut cmd = test.build_command();
        cmd.args(["--seed", "1"]);
        cmd
    })?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("Placed 2 of 4 row(s) in 2 group(s)"));

    let json = read_output(&test)?;
    let groups = json.as_object().unwrap();
    let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Habo | Västergötland", "Atlantis | Dalsland"]);

    let habo = &groups["Habo | Västergötland"];
    let rows = habo["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Titel"], "Polska efter Lapp-Nils");
    assert_eq!(rows[0]["coords"], serde_json::json!([[57.91, 14.07]]));
    assert!(rows[0]["filter"].is_object());

    // Group coordinates are jittered by at most 0.01 degrees
    let coord = habo["coords"][0].as_array().unwrap();
    let lat = coord[0].as_f64().unwrap();
    let long = coord[1].as_f64().unwrap();
    assert!((lat - 57.91).abs() <= 0.01 + 1e-9);
    assert!((long - 14.07).abs() <= 0.01 + 1e-9);

    let atlantis = &groups["Atlantis | Dalsland"];
    assert_eq!(atlantis["coords"], serde_json::json!([]));
    assert_eq!(atlantis["rows"][0]["coords"], serde_json::json!([]));

    Ok(())
}

#[test]
fn test_build_lists_unresolved_rows() -> Result<()> {
    let test = seeded_project()?;

    let output = run(test.build_command())?;
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    assert!(out.contains("1 row(s) need manual review:"));
    assert!(out.contains("row 3: Atlantis | Dalsland"));

    Ok(())
}

#[test]
fn test_build_strict_fails_on_unresolved_rows() -> Result<()> {
    let test = seeded_project()?;

    let output = run({
        let mut cmd = test.build_command();
        cmd.arg("--strict");
        cmd
    })?;
    assert_eq!(output.status.code(), Some(1));
    // The output is still written
    assert!(test.root().join("public/hitta.json").exists());

    Ok(())
}

#[test]
fn test_build_strict_ignores_blank_provenance() -> Result<()> {
    let test = seeded_project()?;
    test.write_file(
        "hitta-folkmusiken.csv",
        "Titel,Proveniens,Landskap\nVisa,Habo,Västergötland\nVals,\"   \",Dalsland\n",
    )?;

    let output = run({
        let mut cmd = test.build_command();
        cmd.arg("--strict");
        cmd
    })?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(!stdout(&output).contains("manual review"));

    Ok(())
}

#[test]
fn test_build_same_seed_same_output() -> Result<()> {
    let test = seeded_project()?;

    let mut first = test.build_command();
    first.args(["--seed", "7"]);
    run(first)?;
    let first_json = test.read_file("public/hitta.json")?;

    let mut second = test.build_command();
    second.args(["--seed", "7"]);
    run(second)?;
    let second_json = test.read_file("public/hitta.json")?;

    assert_eq!(first_json, second_json);

    Ok(())
}

#[test]
fn test_build_offline_skips_uncached_queries() -> Result<()> {
    let test = CliTest::with_boundaries()?;
    test.write_file(
        "hitta-folkmusiken.csv",
        "Titel,Proveniens,Landskap\nVisa,Fagerhult,Västergötland\n",
    )?;

    let output = run(test.build_command())?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Placed 0 of 1 row(s) in 1 group(s)"));
    assert!(out.contains("2 uncached quer(ies) were skipped. Set GMAPS_API_KEY"));
    // Offline misses are not remembered
    assert!(!test.root().join("loc.cache").exists());

    Ok(())
}

#[test]
fn test_build_uses_config_paths() -> Result<()> {
    let test = seeded_project()?;
    test.write_file(
        ".tunemaprc.json",
        r#"{ "output": "site/data.json", "jitter": 0 }"#,
    )?;

    let output = run(test.build_command())?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let json: Value = serde_json::from_str(&test.read_file("site/data.json")?)?;
    assert_eq!(
        json["Habo | Västergötland"]["coords"],
        serde_json::json!([[57.91, 14.07]])
    );

    Ok(())
}

#[test]
fn test_build_cli_paths_override_config() -> Result<()> {
    let test = seeded_project()?;
    test.write_file("data/sheet.csv", "Proveniens,Landskap\nHabo,Västergötland\n")?;

    let output = run({
        let mut cmd = test.build_command();
        cmd.args(["--input", "data/sheet.csv", "--output", "out.json"]);
        cmd
    })?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let json: Value = serde_json::from_str(&test.read_file("out.json")?)?;
    assert_eq!(json.as_object().unwrap().len(), 1);

    Ok(())
}

#[test]
fn test_build_missing_boundaries_is_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("hitta-folkmusiken.csv", SHEET)?;

    let output = run(test.build_command())?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read boundary file"));

    Ok(())
}

#[test]
fn test_build_unknown_region_is_error() -> Result<()> {
    let test = seeded_project()?;
    test.write_file(".tunemaprc.json", r#"{ "regions": ["Skåne"] }"#)?;

    let output = run(test.build_command())?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Skåne"));

    Ok(())
}
