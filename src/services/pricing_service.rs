//! Motor de tarifas
//!
//! Cálculo de tarifa puro y determinista: (categoría de servicio, distancia,
//! hora programada) -> importe. La tabla de tarifas es declarativa
//! (banda -> importe) para que los cambios de tarifa sean edición de datos
//! y las pruebas sean dirigidas por tabla. Sin I/O.

use chrono::{DateTime, Timelike, Utc};
use lazy_static::lazy_static;
use rust_decimal::Decimal;

use crate::models::service_category::ServiceCategory;

/// Banda horaria derivada de la hora programada.
/// La madrugada comparte tabla con la tarde-noche.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBand {
    Day,
    EveningNight,
}

/// Clase de vehículo derivada del nombre de la categoría
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleClass {
    Ambulatory,
    Wheelchair,
}

/// Tarifas planas por tramo de distancia más recargo por milla
/// para trayectos largos (> 50 millas sobre la base de 50)
#[derive(Debug)]
pub struct RateCard {
    flat: [(Decimal, Decimal); 4],
    overage_per_mile: Decimal,
}

impl RateCard {
    fn new(flat_cents: [i64; 4], overage_cents: i64) -> Self {
        Self {
            flat: [
                (Decimal::from(5), Decimal::new(flat_cents[0], 2)),
                (Decimal::from(10), Decimal::new(flat_cents[1], 2)),
                (Decimal::from(20), Decimal::new(flat_cents[2], 2)),
                (Decimal::from(50), Decimal::new(flat_cents[3], 2)),
            ],
            overage_per_mile: Decimal::new(overage_cents, 2),
        }
    }

    fn fare_for(&self, distance_miles: Decimal) -> Decimal {
        for (max_miles, fare) in &self.flat {
            if distance_miles <= *max_miles {
                return *fare;
            }
        }
        let (long_haul_miles, long_haul_base) = self.flat[3];
        long_haul_base + (distance_miles - long_haul_miles) * self.overage_per_mile
    }
}

lazy_static! {
    static ref DAY_AMBULATORY: RateCard = RateCard::new([2500, 3000, 4500, 7500], 200);
    static ref DAY_WHEELCHAIR: RateCard = RateCard::new([3500, 4500, 6000, 8500], 250);
    static ref EVENING_AMBULATORY: RateCard = RateCard::new([3000, 4000, 5500, 8500], 250);
    static ref EVENING_WHEELCHAIR: RateCard = RateCard::new([4500, 5500, 7500, 10500], 300);
}

/// Distancia por defecto cuando la solicitud no la indica
pub fn default_distance_miles() -> Decimal {
    Decimal::from(5)
}

/// Conversión de kilómetros (entrada del cliente) a millas (almacenado)
pub fn miles_from_km(km: Decimal) -> Decimal {
    (km * Decimal::new(621_371, 6)).round_dp(2)
}

fn band_for_hour(hour: u32) -> Option<TimeBand> {
    match hour {
        6..=17 => Some(TimeBand::Day),
        18..=23 | 0..=5 => Some(TimeBand::EveningNight),
        _ => None,
    }
}

fn classify_category(name: &str) -> Option<VehicleClass> {
    let name = name.to_lowercase();
    if name.contains("wheelchair") {
        Some(VehicleClass::Wheelchair)
    } else if name.contains("ambulatory") {
        Some(VehicleClass::Ambulatory)
    } else {
        None
    }
}

fn rate_card(band: TimeBand, class: VehicleClass) -> &'static RateCard {
    match (band, class) {
        (TimeBand::Day, VehicleClass::Ambulatory) => &DAY_AMBULATORY,
        (TimeBand::Day, VehicleClass::Wheelchair) => &DAY_WHEELCHAIR,
        (TimeBand::EveningNight, VehicleClass::Ambulatory) => &EVENING_AMBULATORY,
        (TimeBand::EveningNight, VehicleClass::Wheelchair) => &EVENING_WHEELCHAIR,
    }
}

/// Calcular la tarifa base de un viaje.
///
/// Si la hora quedara fuera de todas las bandas o el nombre de la categoría
/// no clasifica en ninguna clase de vehículo, se recurre a la tarifa propia
/// de la categoría: base_price + distancia * price_per_mile.
pub fn price(
    category: &ServiceCategory,
    distance_miles: Decimal,
    scheduled_at: DateTime<Utc>,
) -> Decimal {
    let amount = match (
        band_for_hour(scheduled_at.hour()),
        classify_category(&category.name),
    ) {
        (Some(band), Some(class)) => rate_card(band, class).fare_for(distance_miles),
        _ => category.base_price + distance_miles * category.price_per_mile,
    };
    amount.round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ride::ServiceType;
    use chrono::TimeZone;

    fn category(name: &str) -> ServiceCategory {
        ServiceCategory {
            id: 1,
            name: name.to_string(),
            service_type: ServiceType::Medical,
            base_price: Decimal::new(4000, 2),
            price_per_mile: Decimal::new(300, 2),
            is_active: true,
        }
    }

    fn at_hour(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_rate_table() {
        // (categoría, millas, hora, importe esperado en centavos)
        let cases: &[(&str, i64, u32, i64)] = &[
            // Día, ambulatory
            ("Ambulatory Transport", 3, 10, 2500),
            ("Ambulatory Transport", 5, 10, 2500),
            ("Ambulatory Transport", 8, 10, 3000),
            ("Ambulatory Transport", 15, 10, 4500),
            ("Ambulatory Transport", 50, 10, 7500),
            ("Ambulatory Transport", 51, 10, 7700),
            // Día, wheelchair
            ("Wheelchair Van", 4, 9, 3500),
            ("Wheelchair Van", 18, 14, 6000),
            ("Wheelchair Van", 60, 12, 11000),
            // Tarde, ambulatory
            ("Ambulatory Transport", 8, 19, 4000),
            ("Ambulatory Transport", 45, 22, 8500),
            // Tarde/noche, wheelchair
            ("Wheelchair Van", 60, 20, 13500),
            ("Wheelchair Van", 5, 23, 4500),
            // Madrugada usa la tabla de tarde-noche
            ("Ambulatory Transport", 8, 3, 4000),
            ("Wheelchair Van", 15, 0, 7500),
        ];

        for (name, miles, hour, expected_cents) in cases {
            let fare = price(&category(name), Decimal::from(*miles), at_hour(*hour));
            assert_eq!(
                fare,
                dec(*expected_cents),
                "fare mismatch for {} at {} mi, hour {}",
                name,
                miles,
                hour
            );
        }
    }

    #[test]
    fn test_time_band_edges() {
        let amb = category("Ambulatory Transport");
        let twelve = Decimal::from(12);
        // 05:59 todavía es noche, 06:00 ya es día
        assert_eq!(price(&amb, twelve, at_hour(5)), dec(5500));
        assert_eq!(price(&amb, twelve, at_hour(6)), dec(4500));
        // 17:xx es día, 18:00 ya es tarde
        assert_eq!(price(&amb, twelve, at_hour(17)), dec(4500));
        assert_eq!(price(&amb, twelve, at_hour(18)), dec(5500));
    }

    #[test]
    fn test_fractional_overage_rounds_to_cents() {
        let fare = price(
            &category("Ambulatory Transport"),
            Decimal::new(505, 1), // 50.5 millas
            at_hour(10),
        );
        assert_eq!(fare, dec(7600));

        let fare = price(
            &category("Wheelchair Van"),
            Decimal::new(5225, 2), // 52.25 millas
            at_hour(20),
        );
        assert_eq!(fare, dec(11175));
    }

    #[test]
    fn test_unclassified_category_falls_back_to_category_rates() {
        // base 40.00 + 8 mi * 3.00 = 64.00
        let fare = price(&category("Bariatric Van"), Decimal::from(8), at_hour(10));
        assert_eq!(fare, dec(6400));
    }

    #[test]
    fn test_monotonic_in_distance() {
        let distances: [Decimal; 10] = [
            Decimal::from(1),
            Decimal::from(5),
            Decimal::new(55, 1),
            Decimal::from(10),
            Decimal::from(15),
            Decimal::from(20),
            Decimal::from(35),
            Decimal::from(50),
            Decimal::from(55),
            Decimal::from(80),
        ];
        for name in ["Ambulatory Transport", "Wheelchair Van"] {
            for hour in [10, 20] {
                let mut previous = Decimal::ZERO;
                for d in distances {
                    let fare = price(&category(name), d, at_hour(hour));
                    assert!(
                        fare >= previous,
                        "fare decreased for {} at {} mi, hour {}",
                        name,
                        d,
                        hour
                    );
                    previous = fare;
                }
            }
        }
    }

    #[test]
    fn test_miles_from_km() {
        assert_eq!(miles_from_km(Decimal::from(10)), Decimal::new(621, 2));
        assert_eq!(miles_from_km(Decimal::from(100)), Decimal::new(6214, 2));
    }

    #[test]
    fn test_default_distance() {
        assert_eq!(default_distance_miles(), Decimal::from(5));
    }
}
