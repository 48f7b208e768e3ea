//! Integration tests for elasto-material.

use elasto_material::corotational::{
    cauchy_strain, cauchy_strain_rate, isotropic_stress, update_plastic_strain,
};
use elasto_material::{ConstitutiveModel, CorotationalModel, MaterialDatabase, MaterialProperties};
use elasto_math::{Mat2, Mat2Ext, Vec2};
use elasto_types::ElastoError;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn rotation(theta: f32) -> Mat2 {
    Mat2::from_angle(theta)
}

// ─── MaterialProperties Tests ─────────────────────────────────

#[test]
fn defaults_match_reference_scene() {
    let props = MaterialProperties::default();
    assert_eq!(props.lame_lambda, 1000.0);
    assert_eq!(props.lame_mu, 1000.0);
    assert_eq!(props.yield_strain, 0.5);
    assert_eq!(props.creep, 25.0);
    assert_eq!(props.plastic_cap, 0.6);
    assert_eq!(props.damping_lambda, 10.0);
    assert_eq!(props.damping_mu, 10.0);
    assert_eq!(props.toughness, 500.0);
    assert!(props.validate().is_ok());
}

#[test]
fn derived_moduli() {
    let props = MaterialProperties::default().with_stiffness(1000.0);
    // λ = μ: E = 2.5μ, ν = 0.25.
    assert!(approx(props.youngs_modulus(), 2500.0));
    assert!(approx(props.poisson_ratio(), 0.25));

    let zero = MaterialProperties::default().with_stiffness(0.0);
    assert_eq!(zero.youngs_modulus(), 0.0);
    assert_eq!(zero.poisson_ratio(), 0.0);
}

#[test]
fn validate_rejects_negative() {
    let props = MaterialProperties {
        lame_mu: -1.0,
        ..Default::default()
    };
    assert!(matches!(props.validate(), Err(ElastoError::InvalidMaterial(_))));
}

#[test]
fn validate_rejects_non_finite() {
    let props = MaterialProperties::default().with_damping(f32::NAN);
    assert!(matches!(props.validate(), Err(ElastoError::InvalidMaterial(_))));
}

#[test]
fn partial_toml_fills_defaults() {
    let props: MaterialProperties = toml::from_str(
        r#"
        name = "soft"
        lame_lambda = 50.0
        "#,
    )
    .unwrap();
    assert_eq!(props.name, "soft");
    assert_eq!(props.lame_lambda, 50.0);
    assert_eq!(props.lame_mu, 1000.0);
}

#[test]
fn json_roundtrip() {
    let props = elasto_material::database::beam();
    let json = serde_json::to_string(&props).unwrap();
    let back: MaterialProperties = serde_json::from_str(&json).unwrap();
    assert_eq!(props, back);
}

// ─── Strain / Stress Tests ────────────────────────────────────

#[test]
fn rigid_rotation_has_no_strain() {
    let r = rotation(0.7);
    let e = cauchy_strain(r, r);
    assert!(e.frobenius_norm() < 1e-5);
}

#[test]
fn uniaxial_stretch_strain() {
    let f = Mat2::from_cols(Vec2::new(1.1, 0.0), Vec2::new(0.0, 1.0));
    let e = cauchy_strain(Mat2::IDENTITY, f);
    assert!(approx(e.at(0, 0), 0.1));
    assert!(approx(e.at(1, 1), 0.0));
    assert!(approx(e.at(0, 1), 0.0));
}

#[test]
fn strain_rate_is_symmetric() {
    let f_dot = Mat2::from_cols(Vec2::new(0.0, 2.0), Vec2::new(0.0, 0.0));
    let rate = cauchy_strain_rate(Mat2::IDENTITY, f_dot);
    assert!(approx(rate.at(0, 1), 1.0));
    assert!(approx(rate.at(1, 0), 1.0));
}

#[test]
fn isotropic_stress_formula() {
    let e = Mat2::from_cols(Vec2::new(0.1, 0.02), Vec2::new(0.02, -0.05));
    let s = isotropic_stress(e, 100.0, 10.0);
    // tr(e) = 0.05 → λ tr = 5.
    assert!(approx(s.at(0, 0), 5.0 + 2.0));
    assert!(approx(s.at(1, 1), 5.0 - 1.0));
    assert!(approx(s.at(0, 1), 0.4));
}

// ─── Plasticity Tests ─────────────────────────────────────────

#[test]
fn below_yield_leaves_plastic_strain() {
    let props = MaterialProperties::default();
    let mut ep = Mat2::ZERO;
    let strain = Mat2::IDENTITY * 0.1;
    assert!(!update_plastic_strain(&mut ep, strain, 0.01, &props));
    assert_eq!(ep, Mat2::ZERO);
}

#[test]
fn above_yield_creeps() {
    let props = MaterialProperties::default();
    let mut ep = Mat2::ZERO;
    let strain = Mat2::IDENTITY * 0.5; // norm ≈ 0.707 > 0.5
    assert!(update_plastic_strain(&mut ep, strain, 0.01, &props));
    // 0.5 * 0.01 * 25 = 0.125 per diagonal entry.
    assert!(approx(ep.at(0, 0), 0.125));
    assert!(approx(ep.at(1, 1), 0.125));
}

#[test]
fn plastic_strain_is_capped() {
    let props = MaterialProperties::default();
    let mut ep = Mat2::ZERO;
    let strain = Mat2::IDENTITY * 2.0;
    for _ in 0..100 {
        update_plastic_strain(&mut ep, strain, 0.1, &props);
        assert!(ep.frobenius_norm() <= props.plastic_cap + 1e-5);
    }
    assert!(approx(ep.frobenius_norm(), props.plastic_cap));
}

// ─── CorotationalModel Tests ──────────────────────────────────

#[test]
fn rest_state_has_zero_stress() {
    let model = CorotationalModel::default();
    let mut ep = Mat2::ZERO;
    let state = model.evaluate(Mat2::IDENTITY, Mat2::ZERO, &mut ep, 0.01);
    assert_eq!(state.stress, Mat2::ZERO);
    assert_eq!(state.rotation, Mat2::IDENTITY);
    assert!(!state.yielded);
}

#[test]
fn rotated_rest_state_has_zero_stress() {
    let model = CorotationalModel::default();
    let mut ep = Mat2::ZERO;
    let state = model.evaluate(rotation(1.2), Mat2::ZERO, &mut ep, 0.01);
    assert!(state.stress.frobenius_norm() < 1e-2);
}

#[test]
fn stretch_produces_tension() {
    let model = CorotationalModel::default();
    let mut ep = Mat2::ZERO;
    let f = Mat2::from_cols(Vec2::new(1.1, 0.0), Vec2::new(0.0, 1.0));
    let state = model.evaluate(f, Mat2::ZERO, &mut ep, 0.01);
    assert!(state.stress.at(0, 0) > 0.0);
    assert!(approx(state.stress.at(0, 0), 1000.0 * 0.1 + 2.0 * 1000.0 * 0.1));
}

#[test]
fn damping_opposes_rate() {
    let props = MaterialProperties::default().with_stiffness(0.0).with_damping(5.0);
    let model = CorotationalModel::new(props);
    let mut ep = Mat2::ZERO;
    let f_dot = Mat2::from_cols(Vec2::new(1.0, 0.0), Vec2::ZERO);
    let state = model.evaluate(Mat2::IDENTITY, f_dot, &mut ep, 0.01);
    assert_eq!(state.elastic_stress, Mat2::ZERO);
    assert!(approx(state.damping_stress.at(0, 0), 5.0 + 10.0));
    assert_eq!(state.stress, state.damping_stress);
}

#[test]
fn model_name() {
    assert_eq!(CorotationalModel::default().name(), "corotational");
}

// ─── MaterialDatabase Tests ──────────────────────────────────

#[test]
fn default_database_has_presets() {
    let db = MaterialDatabase::with_defaults();
    assert_eq!(db.len(), 5);
    assert_eq!(db.names(), vec!["beam", "convex", "default", "shape", "torus"]);
}

#[test]
fn preset_parameters() {
    let db = MaterialDatabase::with_defaults();
    let beam = db.get("beam").unwrap();
    assert_eq!(beam.lame_lambda, 4000.0);
    assert_eq!(beam.damping_mu, 200.0);
    assert_eq!(beam.toughness, 8000.0);

    let shape = db.get("shape").unwrap();
    assert_eq!(shape.density, 140.0);
    assert_eq!(shape.lame_mu, 42000.0);

    assert_eq!(db.get("torus").unwrap().lame_mu, db.get("convex").unwrap().lame_mu);
}

#[test]
fn all_presets_validate() {
    let db = MaterialDatabase::with_defaults();
    for name in db.names() {
        assert!(db.get(name).unwrap().validate().is_ok(), "{name}");
    }
}

#[test]
fn missing_material_returns_none() {
    let db = MaterialDatabase::with_defaults();
    assert!(db.get("nonexistent").is_none());
}

#[test]
fn custom_material() {
    let mut db = MaterialDatabase::empty();
    assert!(db.is_empty());
    db.register(MaterialProperties {
        name: "rubber".into(),
        ..Default::default()
    });
    assert_eq!(db.len(), 1);
    assert!(db.get("rubber").is_some());
}
