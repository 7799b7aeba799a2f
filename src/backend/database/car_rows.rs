//! Car aggregate reconstruction from joined rows
//!
//! The read queries join `cars`, `manufacturers`, `car_drivers` and
//! `drivers`, producing one row per (car, driver) pair. Car and
//! manufacturer columns repeat on every row of the same car; they are read
//! once per car id while driver columns are appended row by row.
//!
//! `cars.id`, `manufacturers.id` and `drivers.id` would collide under a
//! plain `SELECT *`, so every column is selected under its own alias and
//! decoded by that name.

use std::collections::HashMap;

use crate::models::{Car, Driver, Manufacturer};

/// Column list shared by all car read queries
pub const CAR_COLUMNS: &str = "c.id AS car_id, c.model AS car_model, \
     m.id AS manufacturer_id, m.name AS manufacturer_name, m.country AS manufacturer_country, \
     d.id AS driver_id, d.name AS driver_name, d.licence_number AS driver_licence_number";

/// Inner joins from a car to its manufacturer and drivers
pub const CAR_JOINS: &str = "FROM cars c \
     JOIN manufacturers m ON c.manufacturer_id = m.id \
     JOIN car_drivers cd ON c.id = cd.car_id \
     JOIN drivers d ON d.id = cd.driver_id";

/// Build a car select over live cars with an optional extra condition
///
/// `condition` is appended with `AND` and carries the store specific
/// placeholder, e.g. `c.id = ?1` or `c.id = $1`.
pub fn select_cars_sql(condition: Option<&str>) -> String {
    let filter = match condition {
        Some(condition) => format!(" AND {}", condition),
        None => String::new(),
    };
    format!(
        "SELECT {} {} WHERE c.is_deleted = FALSE{} ORDER BY c.id, d.id",
        CAR_COLUMNS, CAR_JOINS, filter
    )
}

/// One row of the car/manufacturer/driver join
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CarDriverRow {
    pub car_id: i64,
    pub car_model: String,
    pub manufacturer_id: i64,
    pub manufacturer_name: String,
    pub manufacturer_country: String,
    pub driver_id: i64,
    pub driver_name: String,
    pub driver_licence_number: String,
}

impl CarDriverRow {
    fn driver(&self) -> Driver {
        Driver::with_id(
            self.driver_id,
            self.driver_name.clone(),
            self.driver_licence_number.clone(),
        )
    }

    fn into_car(self) -> Car {
        let driver = self.driver();
        Car {
            id: Some(self.car_id),
            model: self.car_model,
            manufacturer: Manufacturer::with_id(
                self.manufacturer_id,
                self.manufacturer_name,
                self.manufacturer_country,
            ),
            drivers: vec![driver],
        }
    }
}

/// Fold joined rows into one aggregate per car id
///
/// Cars come out in the order their first row was seen. Rows of the same
/// car need not be adjacent.
pub fn fold_car_rows<I>(rows: I) -> Vec<Car>
where
    I: IntoIterator<Item = CarDriverRow>,
{
    let (cars, _) = rows.into_iter().fold(
        (Vec::<Car>::new(), HashMap::<i64, usize>::new()),
        |(mut cars, mut index), row| {
            match index.get(&row.car_id) {
                Some(&position) => cars[position].drivers.push(row.driver()),
                None => {
                    index.insert(row.car_id, cars.len());
                    cars.push(row.into_car());
                }
            }
            (cars, index)
        },
    );
    cars
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(car_id: i64, model: &str, driver_id: i64) -> CarDriverRow {
        CarDriverRow {
            car_id,
            car_model: model.to_string(),
            manufacturer_id: 100 + car_id,
            manufacturer_name: format!("maker-{}", car_id),
            manufacturer_country: "Ukraine".to_string(),
            driver_id,
            driver_name: format!("driver-{}", driver_id),
            driver_licence_number: format!("LIC-{}", driver_id),
        }
    }

    #[test]
    fn test_rows_of_one_car_collapse_into_one_aggregate() {
        let cars = fold_car_rows(vec![row(1, "Lanos", 10), row(1, "Lanos", 11), row(1, "Lanos", 12)]);

        assert_eq!(cars.len(), 1);
        let car = &cars[0];
        assert_eq!(car.id, Some(1));
        assert_eq!(car.model, "Lanos");
        assert_eq!(car.manufacturer, Manufacturer::with_id(101, "maker-1", "Ukraine"));
        assert_eq!(car.driver_ids(), vec![10, 11, 12]);
        assert_eq!(car.drivers[1].licence_number, "LIC-11");
    }

    #[test]
    fn test_manufacturer_id_is_not_confused_with_car_or_driver_id() {
        let cars = fold_car_rows(vec![row(3, "Sens", 7)]);

        assert_eq!(cars[0].id, Some(3));
        assert_eq!(cars[0].manufacturer.id, Some(103));
        assert_eq!(cars[0].drivers[0].id, Some(7));
    }

    #[test]
    fn test_multiple_cars_keep_first_seen_order() {
        let cars = fold_car_rows(vec![
            row(2, "Tavria", 20),
            row(5, "Slavuta", 50),
            row(2, "Tavria", 21),
            row(5, "Slavuta", 51),
            row(9, "Forza", 90),
        ]);

        let ids: Vec<_> = cars.iter().map(|c| c.id.unwrap()).collect();
        assert_eq!(ids, vec![2, 5, 9]);
        assert_eq!(cars[0].driver_ids(), vec![20, 21]);
        assert_eq!(cars[1].driver_ids(), vec![50, 51]);
        assert_eq!(cars[2].driver_ids(), vec![90]);
    }

    #[test]
    fn test_duplicate_associations_are_kept() {
        let cars = fold_car_rows(vec![row(4, "Vida", 8), row(4, "Vida", 8)]);

        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].driver_ids(), vec![8, 8]);
    }

    #[test]
    fn test_no_rows_no_cars() {
        assert!(fold_car_rows(Vec::new()).is_empty());
    }

    #[test]
    fn test_select_sql() {
        let all = select_cars_sql(None);
        assert!(all.contains("WHERE c.is_deleted = FALSE ORDER BY"));
        assert!(all.contains("m.id AS manufacturer_id"));

        let one = select_cars_sql(Some("c.id = ?1"));
        assert!(one.contains("WHERE c.is_deleted = FALSE AND c.id = ?1 ORDER BY c.id, d.id"));
    }
}
