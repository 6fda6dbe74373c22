mod common;

use approx::assert_abs_diff_eq;
use common::assert_position_close;
use cosmos::{
    body::{BodyType, CelestialBody, GeneralInfo, PhysicalProperties},
    catalogue::{solar_system, solar_system_catalogue, Catalogue},
    constants::RADEG,
    display::PositionsTable,
    star_system::StarSystem,
    trajectory::{write_trajectories_csv, TimeGrid},
    CosmosError, OrbitalElements,
};
use nalgebra::Vector3;

fn physical(body_type: BodyType) -> PhysicalProperties {
    PhysicalProperties {
        mass: 1.0e22,
        radius: 1000.0,
        body_type,
        axial_tilt: 0.0,
        rotation_period: 1.0,
    }
}

#[test]
fn test_preset_planets_start_at_periapsis() {
    let system = solar_system().unwrap();
    for (id, body) in system.bodies() {
        let position = system.absolute_position_at_time(id, 0.0).unwrap();
        if body.orbital_elements().is_fixed() {
            assert_eq!(position, Vector3::zeros());
            continue;
        }
        let expected = Vector3::new(body.periapsis(), 0.0, 0.0);
        assert_position_close(&position, &expected, 1e-6);
    }
}

#[test]
fn test_preset_inclination_tilt() {
    let system = solar_system().unwrap();
    let mercury = system.find("Mercury").unwrap();
    let period = system.body(mercury).unwrap().orbital_period();

    // off the x axis the tilt fixes the ratio z / y
    let position = system
        .relative_position_at_time(mercury, period / 4.0)
        .unwrap();
    assert!(position.z > 0.0);
    assert_abs_diff_eq!(position.z / position.y, (3.38 * RADEG).tan(), epsilon = 1e-12);
}

#[test]
fn test_moon_absolute_position_follows_parent() {
    let mut system = StarSystem::new("Pair", Vector3::zeros());
    let star = CelestialBody::new(
        GeneralInfo::new("Star", ""),
        OrbitalElements::fixed(),
        physical(BodyType::Star),
    )
    .unwrap();
    let planet = CelestialBody::new(
        GeneralInfo::new("Planet", "").with_parent("Star"),
        OrbitalElements::new(0.0, 100.0, 0.0, 40.0).unwrap(),
        physical(BodyType::Planet),
    )
    .unwrap();
    let moon = CelestialBody::new(
        GeneralInfo::new("Moon", "").with_parent("Planet"),
        OrbitalElements::new(0.0, 1.0, 0.0, 5.0).unwrap(),
        physical(BodyType::Moon),
    )
    .unwrap();
    system.add_body(star).unwrap();
    let planet_id = system.add_body(planet).unwrap();
    let moon_id = system.add_body(moon).unwrap();
    system.link_satellites().unwrap();

    assert_eq!(system.parent_of(moon_id), Some(planet_id));

    // planet a quarter of the way round, moon after two full revolutions
    let absolute = system.absolute_position_at_time(moon_id, 10.0).unwrap();
    assert_position_close(&absolute, &Vector3::new(1.0, 100.0, 0.0), 1e-9);

    let relative = system.relative_position_at_time(moon_id, 10.0).unwrap();
    assert_position_close(&relative, &Vector3::new(1.0, 0.0, 0.0), 1e-9);
}

#[test]
fn test_trajectories_csv_rows() {
    let system = solar_system().unwrap();
    let grid = TimeGrid::new(0.0, 364.0, 1.0).unwrap();
    let trajectories = system.sample_trajectories(&grid).unwrap();
    assert_eq!(trajectories.len(), 5);
    assert!(trajectories.iter().all(|traj| traj.len() == 365));

    let mut buffer = Vec::new();
    write_trajectories_csv(&trajectories, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text.lines().count(), 1 + 5 * 365);
    assert_eq!(text.lines().next(), Some("body,t,x,y,z"));
    assert!(text.lines().nth(1).unwrap().starts_with("Sun,0.0,"));
}

#[test]
fn test_catalogue_file_round_trip() {
    let path = std::env::temp_dir().join(format!("cosmos-catalogue-{}.toml", std::process::id()));
    let text = solar_system_catalogue().to_toml_string().unwrap();
    std::fs::write(&path, text).unwrap();

    let loaded = Catalogue::from_file(&path);
    std::fs::remove_file(&path).unwrap();

    let system = loaded.unwrap().into_star_system().unwrap();
    assert_eq!(system.name(), "Sol");
    assert_eq!(system.len(), 5);
    assert_eq!(system.roots().count(), 1);
}

#[test]
fn test_positions_table_lists_every_body() {
    let system = solar_system().unwrap();
    let rendered = PositionsTable::new(&system, 100.0).unwrap().to_string();
    for name in ["Sun", "Mercury", "Venus", "Earth", "Mars"] {
        assert!(rendered.contains(name), "{name} missing from\n{rendered}");
    }
}

#[test]
fn test_propagation_error_names_body() {
    let system = solar_system().unwrap();
    let earth = system.find("Earth").unwrap();
    match system.absolute_position_at_time(earth, f64::NAN) {
        Err(CosmosError::PropagationFailed { body, t, source }) => {
            assert_eq!(body, "Earth");
            assert!(t.is_nan());
            assert!(matches!(*source, CosmosError::InvalidTime(_)));
        }
        other => panic!("expected a propagation failure, got {other:?}"),
    }
}
