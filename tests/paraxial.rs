//! Traced rays against closed-form Gaussian optics.

use glam::DVec3;

use lenstrace::{
    glass::D_LINE, Glass, Outcome, PlaneMirror, Ray, Scene, Screen, SphereLens, SphereMirror,
    SpiralSource, SurfaceId,
};

fn init_logs() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
}

/// A collimated paraxial ray through a single spherical refracting surface
/// crosses the axis at v = n2 R / (n2 - n1) behind the vertex.
#[test]
fn single_surface_paraxial_focus() {
    init_logs();

    let r = 0.5;
    let (n1, n2) = (1.0, 1.5);
    let v = n2 * r / (n2 - n1);

    let mut scene = Scene::new();
    scene.insert_surface(SphereLens::coaxial(0.0, r, 0.1, n1, n2).unwrap());

    let h = 1e-4;
    let mut ray = Ray::new(DVec3::new(h, 0., -1.), DVec3::Z);
    scene.trace(&mut ray);
    assert_eq!(ray.outcome(), Outcome::InFlight);

    // Where the refracted ray crosses the axis
    let p = ray.position();
    let d = ray.direction();
    let crossing = p.z - p.x / d.x * d.z;

    assert!(
        ((crossing - v) / v).abs() < 1e-6,
        "axis crossing {crossing} instead of {v}"
    );
}

/// A whole paraxial bundle lands within the focus tolerance on a screen at
/// the focal plane.
#[test]
fn paraxial_bundle_focuses_on_screen() {
    init_logs();

    let v = 1.5;
    let mut scene = Scene::new();
    scene.insert_surface(SphereLens::coaxial(0.0, 0.5, 0.1, 1.0, 1.5).unwrap());
    let screen = scene.insert_surface(Screen::new(DVec3::new(0., 0., v), DVec3::Z).unwrap());
    scene.insert_source(SpiralSource::new(DVec3::new(0., 0., -1.), DVec3::Z, 2e-4, 24));

    let mut rays = scene.spawn();
    scene.trace_bundle(&mut rays);
    let spot = scene.spot(screen, &rays).unwrap();

    assert_eq!(spot.len(), 24);
    for point in &spot.points {
        assert!(point.length() < 1e-6 * v);
    }
}

/// A singlet built from the catalog index of BK7 at the d line focuses where
/// v = n R / (n - 1) says.
#[test]
fn bk7_singlet_focuses_at_the_catalog_index() {
    init_logs();

    let n = Glass::Bk7.index_at(D_LINE);
    let r = 0.5;
    let v = n * r / (n - 1.);

    let mut scene = Scene::new();
    scene.insert_surface(SphereLens::coaxial(0.0, r, 0.1, 1.0, n).unwrap());
    let screen = scene.insert_surface(Screen::new(DVec3::new(0., 0., v), DVec3::Z).unwrap());
    scene.insert_source(SpiralSource::new(DVec3::new(0., 0., -0.5), DVec3::Z, 1e-4, 16));

    let mut rays = scene.spawn();
    scene.trace_bundle(&mut rays);
    let spot = scene.spot(screen, &rays).unwrap();

    assert_eq!(spot.len(), 16);
    assert!(spot.rms_radius().unwrap() < 1e-9);
}

/// A plane parallel slab displaces a ray sideways but does not bend it.
#[test]
fn glass_slab_preserves_direction() {
    init_logs();

    let thickness = 0.1;
    let mut scene = Scene::new();
    scene.insert_surface(SphereLens::coaxial(0.0, 0.0, 1.0, 1.0, 1.5).unwrap());
    scene.insert_surface(SphereLens::coaxial(thickness, 0.0, 1.0, 1.5, 1.0).unwrap());

    let (s, c) = f64::sin_cos(30f64.to_radians());
    let entry = DVec3::new(s, 0., c);
    let mut ray = Ray::new(DVec3::new(-s, 0., -c), entry);
    scene.trace(&mut ray);

    assert_eq!(ray.outcome(), Outcome::InFlight);
    assert!(ray.direction().distance(entry) < 1e-12);
    // Refraction angle inside is asin(1/3), so the exit point sits at
    // thickness * tan(asin(1/3)) = thickness / sqrt(8)
    assert!((ray.position().x - thickness / f64::sqrt(8.)).abs() < 1e-12);
}

/// Past the critical angle a glass-air interface stops the ray and says why;
/// below it the ray refracts through.
#[test]
fn total_internal_reflection_is_reported() {
    init_logs();

    let mut scene = Scene::new();
    let face = scene.insert_surface(SphereLens::coaxial(0.0, 0.0, 1.0, 1.5, 1.0).unwrap());
    let screen = scene.insert_surface(Screen::new(DVec3::new(0., 0., 1.), DVec3::Z).unwrap());

    let (s, c) = f64::sin_cos(45f64.to_radians());
    let mut steep = Ray::new(DVec3::new(-s, 0., -c), DVec3::new(s, 0., c));
    scene.trace(&mut steep);
    assert_eq!(
        steep.outcome(),
        Outcome::TotalInternalReflection { surface: face }
    );

    let (s, c) = f64::sin_cos(30f64.to_radians());
    let mut shallow = Ray::new(DVec3::new(-s, 0., -c), DVec3::new(s, 0., c));
    scene.trace(&mut shallow);
    assert!(matches!(
        shallow.outcome(),
        Outcome::Absorbed { screen: id, .. } if id == screen
    ));
}

/// Equal indices on both sides make a curved interface invisible.
#[test]
fn index_matched_interface_is_invisible() {
    init_logs();

    let mut scene = Scene::new();
    scene.insert_surface(SphereLens::coaxial(0.0, 0.5, 0.1, 1.4, 1.4).unwrap());

    let before = DVec3::new(0.02, 0., 1.).normalize();
    let mut ray = Ray::new(DVec3::new(0.05, 0., -1.), before);
    scene.trace(&mut ray);

    assert_eq!(ray.outcome(), Outcome::InFlight);
    assert!(ray.direction().distance_squared(before) < 1e-24);
}

/// A folded system: the mirror reverses the bundle onto a screen declared
/// after it, with equal angles at the fold.
#[test]
fn plane_mirror_folds_the_path() {
    init_logs();

    let mut scene = Scene::new();
    scene.insert_surface(PlaneMirror::new(DVec3::new(0., 0., 1.), DVec3::Z).unwrap());
    let screen = scene.insert_surface(Screen::new(DVec3::new(0., 0., 0.), DVec3::Z).unwrap());

    let d = DVec3::new(0.1, 0., 1.).normalize();
    let mut ray = Ray::new(DVec3::new(-0.1, 0., 0.), d);
    scene.trace(&mut ray);

    assert!(matches!(
        ray.outcome(),
        Outcome::Absorbed { screen: id, .. } if id == screen
    ));
    let out = ray.direction();
    assert!((out.z + d.z).abs() < 1e-12);
    assert!((out.x - d.x).abs() < 1e-12);
}

/// A concave mirror focuses a collimated paraxial bundle at half its
/// curvature radius.
#[test]
fn sphere_mirror_paraxial_focus() {
    init_logs();

    // Vertex at z = 1, center of curvature at the origin, f = 0.5
    let mut scene = Scene::new();
    scene.insert_surface(SphereMirror::new(DVec3::new(0., 0., 1.), DVec3::Z, -1.0, 0.2).unwrap());
    let screen = scene.insert_surface(Screen::new(DVec3::new(0., 0., 0.5), DVec3::Z).unwrap());

    for i in 0..8 {
        let h = 1e-4 * (1. + i as f64) / 8.;
        let mut ray = Ray::new(DVec3::new(h, 0., 0.), DVec3::Z);
        scene.trace(&mut ray);

        let Outcome::Absorbed { screen: id, hit } = ray.outcome() else {
            panic!("ray lost at height {h}");
        };
        assert_eq!(id, screen);
        assert!(hit.length() < 1e-6 * 0.5, "blur {} at height {h}", hit.length());
    }
}

/// Sequential semantics: a surface that fails to produce a forward hit
/// terminates the ray right there, without consulting later surfaces.
#[test]
fn escape_is_attributed_to_the_failing_surface() {
    init_logs();

    let mut scene = Scene::new();
    scene.insert_surface(SphereLens::coaxial(0.0, 0.5, 0.05, 1.0, 1.5).unwrap());
    scene.insert_surface(Screen::new(DVec3::new(0., 0., 1.5), DVec3::Z).unwrap());

    let mut ray = Ray::new(DVec3::new(0.08, 0., -1.), DVec3::Z);
    scene.trace(&mut ray);

    assert_eq!(
        ray.outcome(),
        Outcome::Escaped {
            surface: SurfaceId(0)
        }
    );
    assert_eq!(ray.path().len(), 1);
}
