//! Static world-map tables for the Earth shape
//!
//! Continents are approximated by overlapping spherical caps; cities are
//! small caps with their own glow color.

use glam::Vec3;

use crate::math::{Color, lat_lon_to_vec3};

/// Spherical cap: every direction within `radius` degrees of a center
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalCap {
    pub lat: f32,
    pub lon: f32,
    /// Angular radius in degrees
    pub radius: f32,
}

impl SphericalCap {
    pub const fn new(lat: f32, lon: f32, radius: f32) -> Self {
        Self { lat, lon, radius }
    }

    /// Unit direction of the cap center
    pub fn center(&self) -> Vec3 {
        lat_lon_to_vec3(self.lat, self.lon, 1.0)
    }

    /// Cosine of the angular radius; `dot(dir, center) > min_dot` is inside
    pub fn min_dot(&self) -> f32 {
        self.radius.to_radians().cos()
    }

    /// True if the unit direction `dir` lies strictly inside the cap
    pub fn contains(&self, dir: Vec3) -> bool {
        dir.dot(self.center()) > self.min_dot()
    }
}

/// City glow point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CityCap {
    pub name: &'static str,
    pub cap: SphericalCap,
    /// Packed `0xRRGGBB` glow color
    pub color: u32,
}

impl CityCap {
    const fn new(name: &'static str, lat: f32, lon: f32, radius: f32) -> Self {
        Self {
            name,
            cap: SphericalCap::new(lat, lon, radius),
            color: CITY_GLOW,
        }
    }

    pub fn glow(&self) -> Color {
        Color::from_hex(self.color)
    }
}

/// Default city glow color
pub const CITY_GLOW: u32 = 0xFFCC00;

/// Surface palette
pub mod colors {
    use crate::math::Color;

    pub const OCEAN: Color = Color::from_hex(0x004466);
    pub const LAND: Color = Color::from_hex(0x0A5030);
    pub const CLOUD: Color = Color::from_hex(0xFFFFFF);
    pub const ICE: Color = Color::from_hex(0xFFFFFF);
    /// Land inside a city cap that lights up during surface sampling
    pub const CITY_SURFACE: Color = Color::from_hex(0xFFD700);
}

/// Continent caps, grouped by region
pub const LAND_CAPS: &[SphericalCap] = &[
    // North America
    SphericalCap::new(40.0, -100.0, 18.0),
    SphericalCap::new(52.0, -110.0, 15.0),
    SphericalCap::new(52.0, -90.0, 15.0),
    SphericalCap::new(32.0, -85.0, 8.0),
    SphericalCap::new(35.0, -115.0, 8.0),
    SphericalCap::new(65.0, -150.0, 10.0),
    SphericalCap::new(60.0, -80.0, 12.0),
    SphericalCap::new(20.0, -102.0, 7.0),
    SphericalCap::new(10.0, -85.0, 4.0),
    SphericalCap::new(75.0, -100.0, 10.0),
    SphericalCap::new(75.0, -40.0, 8.0),
    // South America
    SphericalCap::new(-10.0, -55.0, 15.0),
    SphericalCap::new(-25.0, -60.0, 12.0),
    SphericalCap::new(-45.0, -70.0, 8.0),
    SphericalCap::new(5.0, -75.0, 6.0),
    SphericalCap::new(-15.0, -45.0, 6.0),
    // Africa
    SphericalCap::new(15.0, 10.0, 18.0),
    SphericalCap::new(-5.0, 20.0, 15.0),
    SphericalCap::new(-25.0, 22.0, 10.0),
    SphericalCap::new(10.0, -10.0, 8.0),
    SphericalCap::new(5.0, 40.0, 6.0),
    SphericalCap::new(30.0, 30.0, 6.0),
    // Europe
    SphericalCap::new(48.0, 10.0, 8.0),
    SphericalCap::new(40.0, -4.0, 5.0),
    SphericalCap::new(54.0, -2.0, 4.0),
    SphericalCap::new(62.0, 15.0, 6.0),
    SphericalCap::new(55.0, 35.0, 8.0),
    SphericalCap::new(45.0, 25.0, 5.0),
    SphericalCap::new(40.0, 15.0, 3.0),
    // Asia
    SphericalCap::new(55.0, 90.0, 20.0),
    SphericalCap::new(40.0, 100.0, 15.0),
    SphericalCap::new(30.0, 80.0, 8.0),
    SphericalCap::new(30.0, 55.0, 8.0),
    SphericalCap::new(20.0, 45.0, 6.0),
    SphericalCap::new(15.0, 100.0, 6.0),
    SphericalCap::new(35.0, 138.0, 4.0),
    SphericalCap::new(-2.0, 112.0, 6.0),
    SphericalCap::new(35.0, 128.0, 3.0),
    // Australia and Oceania
    SphericalCap::new(-25.0, 135.0, 12.0),
    SphericalCap::new(-20.0, 145.0, 5.0),
    SphericalCap::new(-30.0, 118.0, 5.0),
    SphericalCap::new(-42.0, 172.0, 3.0),
    SphericalCap::new(-38.0, 176.0, 3.0),
    SphericalCap::new(-6.0, 145.0, 4.0),
    // Antarctica
    SphericalCap::new(-80.0, 0.0, 12.0),
    SphericalCap::new(-80.0, 90.0, 12.0),
    SphericalCap::new(-80.0, -90.0, 12.0),
    SphericalCap::new(-80.0, 180.0, 12.0),
    // Pacific islands, enlarged so the ocean hemisphere is not empty
    SphericalCap::new(19.5, -155.5, 8.0),
    SphericalCap::new(21.0, -157.0, 6.0),
    SphericalCap::new(-17.0, -149.0, 7.0),
    SphericalCap::new(-18.0, 178.0, 7.0),
    SphericalCap::new(-9.0, 160.0, 6.0),
    SphericalCap::new(-0.5, -91.0, 5.0),
    SphericalCap::new(-27.0, -109.0, 5.0),
    SphericalCap::new(-21.0, 165.0, 6.0),
    SphericalCap::new(7.0, 150.0, 6.0),
    SphericalCap::new(7.0, 171.0, 6.0),
    SphericalCap::new(15.0, 145.0, 6.0),
    SphericalCap::new(-14.0, -172.0, 6.0),
    SphericalCap::new(-44.0, -176.0, 5.0),
    SphericalCap::new(-20.0, -160.0, 6.0),
    SphericalCap::new(0.0, 160.0, 6.0),
    SphericalCap::new(-5.0, -140.0, 5.0),
    SphericalCap::new(10.0, -130.0, 12.0),
    SphericalCap::new(-10.0, -110.0, 12.0),
    SphericalCap::new(-30.0, -130.0, 10.0),
    SphericalCap::new(25.0, 170.0, 8.0),
];

/// City glow caps
pub const CITY_CAPS: &[CityCap] = &[
    CityCap::new("New York", 40.7, -74.0, 1.5),
    CityCap::new("Los Angeles", 34.0, -118.2, 1.5),
    CityCap::new("London", 51.5, -0.1, 1.5),
    CityCap::new("Paris", 48.8, 2.3, 1.5),
    CityCap::new("Tokyo", 35.6, 139.7, 1.5),
    CityCap::new("Shanghai", 31.2, 121.5, 1.5),
    CityCap::new("Mumbai", 19.0, 72.8, 1.5),
    CityCap::new("Sao Paulo", -23.5, -46.6, 1.5),
    CityCap::new("Moscow", 55.7, 37.6, 1.5),
    CityCap::new("Cairo", 30.0, 31.2, 1.2),
    CityCap::new("Singapore", 1.3, 103.8, 1.0),
    CityCap::new("Sydney", -33.8, 151.2, 1.2),
    CityCap::new("Dubai", 25.2, 55.3, 1.2),
    CityCap::new("Hong Kong", 22.3, 114.2, 1.2),
    CityCap::new("Seoul", 37.5, 127.0, 1.2),
    CityCap::new("Honolulu", 21.3, -157.8, 1.2),
];

/// Look up a city by name (case-insensitive)
pub fn find_city(name: &str) -> Option<&'static CityCap> {
    CITY_CAPS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}
