//! Delivery cost calculator
//!
//! The single authoritative pricing formula. The server stores the result on
//! the order at creation time and never recomputes it; client-side previews
//! call the same function, so the estimate and the billed amount agree.

use crate::models::PackageType;

/// Flat base cost, in currency units
pub const BASE_COST: f64 = 50.0;

/// Weight included in the base cost, in kilograms
pub const INCLUDED_WEIGHT_KG: f64 = 1.0;

/// Surcharge per kilogram above the included weight
pub const PER_KG_SURCHARGE: f64 = 20.0;

/// Flat surcharge for fragile handling
pub const FRAGILE_SURCHARGE: f64 = 30.0;

/// Compute the delivery cost for a shipment.
///
/// `base + (weight - 1) * 20` for the portion above one kilogram, plus a
/// flat surcharge for fragile packages. Pure and deterministic; the caller
/// has already validated that `weight` is positive.
pub fn delivery_cost(weight: f64, package_type: PackageType) -> f64 {
    let weight_surcharge = (weight - INCLUDED_WEIGHT_KG).max(0.0) * PER_KG_SURCHARGE;
    let fragile_surcharge = if package_type.is_fragile() {
        FRAGILE_SURCHARGE
    } else {
        0.0
    };
    BASE_COST + weight_surcharge + fragile_surcharge
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_parcel_costs_the_base() {
        assert_eq!(delivery_cost(0.5, PackageType::Parcel), 50.0);
    }

    #[test]
    fn the_first_kilogram_is_included() {
        assert_eq!(delivery_cost(1.0, PackageType::Parcel), 50.0);
    }

    #[test]
    fn weight_above_one_kilogram_is_surcharged() {
        assert_eq!(delivery_cost(2.0, PackageType::Document), 70.0);
        assert_eq!(delivery_cost(3.5, PackageType::Pallet), 100.0);
    }

    #[test]
    fn fragile_adds_a_flat_surcharge() {
        assert_eq!(delivery_cost(0.5, PackageType::Fragile), 80.0);
        assert_eq!(delivery_cost(3.0, PackageType::Fragile), 120.0);
    }

    #[test]
    fn cost_never_drops_below_the_base() {
        for weight in [0.01, 0.5, 1.0, 2.0, 10.0, 250.0] {
            for package_type in [
                PackageType::Parcel,
                PackageType::Document,
                PackageType::Fragile,
                PackageType::Pallet,
            ] {
                assert!(delivery_cost(weight, package_type) >= BASE_COST);
            }
        }
    }
}
