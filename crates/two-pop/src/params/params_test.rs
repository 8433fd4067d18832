use approx::assert_relative_eq;

use super::*;
use crate::error::Error;

fn edited_file(name: &str, value: toml::Value) -> String {
    let text = Parameters::default().to_toml_string().unwrap();
    let mut root: toml::Table = text.parse().unwrap();
    root["parameters"]
        .as_table_mut()
        .unwrap()
        .insert(name.to_string(), value);
    toml::to_string(&root).unwrap()
}

#[test]
fn defaults_describe_reference_disk() {
    let p = Parameters::default();

    assert_eq!(p.nr, 200);
    assert_eq!(p.nt, 100);
    assert_eq!(p.na, 150);
    assert_relative_eq!(p.tmax, 1e6 * YEAR);
    assert_relative_eq!(p.mstar / M_SUN, 0.7);
    assert_relative_eq!(p.mdisk / p.mstar, 0.1);
    assert_relative_eq!(p.rc / AU, 200.0);
    assert_relative_eq!(p.rstar / R_SUN, 1.806);
    assert!(p.gasevol);
    assert_eq!(p.dir, "data");
}

#[test]
fn every_declared_parameter_has_a_value_of_its_kind() {
    let p = Parameters::default();
    for spec in PARAMETERS {
        let value = p.value(spec.name).unwrap();
        assert_eq!(value.kind(), spec.kind, "{}", spec.name);
    }
    assert!(p.value("nonsense").is_none());
}

#[test]
fn every_declared_parameter_can_be_assigned() {
    let source = Parameters {
        nr: 17,
        alpha: 3e-3,
        gasevol: false,
        dir: "elsewhere".to_string(),
        ..Parameters::viscous_test()
    };
    let values: Vec<_> = PARAMETERS
        .iter()
        .map(|spec| (spec.name, source.value(spec.name).unwrap()))
        .collect();

    assert_eq!(Parameters::from_values(values).unwrap(), source);
}

#[test]
fn from_values_overrides_defaults() {
    let p = Parameters::from_values([
        ("nr", ParameterValue::from(50_i64)),
        ("alpha", ParameterValue::from(1e-2)),
        ("gasevol", ParameterValue::from(false)),
        ("dir", ParameterValue::from("out")),
    ])
    .unwrap();

    assert_eq!(p.nr, 50);
    assert_relative_eq!(p.alpha, 1e-2);
    assert!(!p.gasevol);
    assert_eq!(p.dir, "out");
    assert_eq!(p.nt, Parameters::default().nt);
}

#[test]
fn unknown_names_are_ignored() {
    let p = Parameters::from_values([
        ("not_a_parameter", ParameterValue::from(3.0)),
        ("d2g", ParameterValue::from(0.1)),
    ])
    .unwrap();

    assert_relative_eq!(p.d2g, 0.1);
    assert_eq!(
        Parameters { d2g: 0.1, ..Parameters::default() },
        p
    );
}

#[test]
fn integers_are_accepted_for_floats() {
    let p = Parameters::from_values([("vfrag", ParameterValue::Integer(500))]).unwrap();
    assert_eq!(p.vfrag, 500.0);
}

#[test]
fn wrong_kind_is_rejected() {
    let err = Parameters::from_values([("nr", ParameterValue::Float(200.0))]).unwrap_err();
    assert!(matches!(
        err,
        Error::ParameterType {
            expected: ParameterKind::Integer,
            found: ParameterKind::Float,
            ..
        }
    ));

    let err = Parameters::from_values([("gasevol", ParameterValue::from("yes"))]).unwrap_err();
    assert!(matches!(err, Error::ParameterType { .. }));
}

#[test]
fn negative_count_is_rejected() {
    let err = Parameters::from_values([("nt", ParameterValue::Integer(-4))]).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { name: "nt", .. }));
}

#[test]
fn validation_guards_the_grids() {
    let p = Parameters {
        nr: 0,
        ..Parameters::default()
    };
    assert!(matches!(p.validate(), Err(Error::InvalidParameter { name: "nr", .. })));

    let p = Parameters {
        tmax: 10.0,
        ..Parameters::default()
    };
    assert!(matches!(p.validate(), Err(Error::InvalidParameter { name: "tmax", .. })));

    // A single snapshot does not need tmax beyond the grid start
    let p = Parameters {
        nt: 1,
        tmax: 10.0,
        ..Parameters::default()
    };
    assert!(p.validate().is_ok());

    let p = Parameters {
        tmax: f64::NAN,
        ..Parameters::default()
    };
    assert!(p.validate().is_err());
}

#[test]
fn crowded_time_grid_is_rejected() {
    // Passes the tmax > start check, but the log-spaced grid collapses
    let p = Parameters {
        nt: 1000,
        tmax: TIME_GRID_START * (1.0 + 1e-13),
        ..Parameters::default()
    };
    assert!(matches!(p.validate(), Err(Error::InvalidParameter { name: "tmax", .. })));
    assert!(crate::grid::InitialConditions::from_parameters(&p).is_err());

    // Few snapshots fit into the same interval
    let p = Parameters { nt: 2, ..p };
    assert!(p.validate().is_ok());
}

#[test]
fn toml_round_trip_preserves_values_and_kinds() {
    let original = Parameters {
        nr: 123,
        tmax: 3.3e12,
        mstar: 1.2345678901234567e33,
        gasevol: false,
        dir: "runs/a".to_string(),
        ..Parameters::default()
    };

    let text = original.to_toml_string().unwrap();
    assert!(text.contains("[parameters]"));
    assert!(text.contains("nr = 123\n"));

    let restored = Parameters::from_toml_str(&text).unwrap();
    assert_eq!(restored, original);

    let root: toml::Table = text.parse().unwrap();
    let section = root["parameters"].as_table().unwrap();
    for spec in PARAMETERS {
        let value = &section[spec.name];
        let expected = match spec.kind {
            ParameterKind::Integer => value.is_integer(),
            ParameterKind::Float => value.is_float(),
            ParameterKind::Boolean => value.is_bool(),
            ParameterKind::Text => value.is_str(),
        };
        assert!(expected, "{} written as {}", spec.name, value.type_str());
    }
}

#[test]
fn integer_entry_is_coerced_for_float_parameter() {
    let text = edited_file("vfrag", toml::Value::Integer(1000));
    let p = Parameters::from_toml_str(&text).unwrap();
    assert_eq!(p.vfrag, 1000.0);
}

#[test]
fn float_entry_for_integer_parameter_is_rejected() {
    let text = edited_file("nr", toml::Value::Float(200.0));
    let err = Parameters::from_toml_str(&text).unwrap_err();
    assert!(matches!(err, Error::ParameterFile(_)));

    let text = edited_file("nt", toml::Value::Integer(-3));
    assert!(Parameters::from_toml_str(&text).is_err());
}

#[test]
fn missing_entry_is_fatal() {
    let text = Parameters::default().to_toml_string().unwrap();
    let mut root: toml::Table = text.parse().unwrap();
    root["parameters"].as_table_mut().unwrap().remove("rhos");
    let text = toml::to_string(&root).unwrap();

    let err = Parameters::from_toml_str(&text).unwrap_err();
    assert!(matches!(err, Error::MissingParameter("rhos")));
}

#[test]
fn malformed_file_is_fatal() {
    let err = Parameters::from_toml_str("[parameters\nnr = ").unwrap_err();
    assert!(matches!(err, Error::ParameterFile(_)));

    let err = Parameters::from_toml_str("[other]\nnr = 1\n").unwrap_err();
    assert!(matches!(err, Error::MissingSection("parameters")));
}

#[test]
fn unknown_entries_in_file_are_ignored() {
    let text = edited_file("legacy_option", toml::Value::Boolean(true));
    let p = Parameters::from_toml_str(&text).unwrap();
    assert_eq!(p, Parameters::default());
}

#[test]
fn directory_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested").join("run");
    let original = Parameters::viscous_test();

    original.write_to_dir(&target).unwrap();
    assert!(target.join(PARAMETER_FILE).is_file());

    let restored = Parameters::read_from_dir(&target).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn reading_from_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = Parameters::read_from_dir(dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn summary_uses_convenient_units() {
    let lines = Parameters::default().summary();

    assert_eq!(lines.len(), PARAMETERS.len());
    assert!(lines.iter().any(|l| l.starts_with("tmax") && l.contains("1.000e6") && l.ends_with("years")));
    assert!(lines.iter().any(|l| l.starts_with("rc") && l.contains("2.000e2") && l.ends_with("AU")));
    assert!(lines.iter().any(|l| l.starts_with("gas evol.") && l.ends_with("on")));
}
