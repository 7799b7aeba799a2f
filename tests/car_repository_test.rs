use car_registry::error::{AppError, Stage};
use car_registry::models::{Car, Driver};

mod common;

use common::TestDatabaseType;

// Macro to run the same test with different database types
macro_rules! matrix_test {
    ($test_name:ident, $test_fn:ident) => {
        paste::paste! {
            #[tokio::test]
            async fn [<$test_name _sqlite>]() {
                $test_fn(TestDatabaseType::Sqlite).await;
            }

            #[tokio::test]
            #[ignore = "requires docker"]
            async fn [<$test_name _postgres>]() {
                $test_fn(TestDatabaseType::Postgres).await;
            }
        }
    };
}

async fn create_and_get_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;

    let car = Car::new(
        "XC90",
        fixture.manufacturer.clone(),
        vec![fixture.drivers[0].clone(), fixture.drivers[1].clone()],
    );
    let created = backend.create_car(&car).await.unwrap();

    let id = created.id.expect("created car should carry an id");
    assert!(id > 0);
    assert_eq!(created.model, "XC90");

    let fetched = backend.find_car_by_id(id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.manufacturer, fixture.manufacturer);
    assert_eq!(
        fetched.driver_ids(),
        vec![fixture.drivers[0].id.unwrap(), fixture.drivers[1].id.unwrap()]
    );
}

async fn get_missing_car_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    common::seed_fixture(backend.as_ref()).await;

    assert!(backend.find_car_by_id(9999).await.unwrap().is_none());
    assert!(backend.find_car_by_id(0).await.unwrap().is_none());
    assert!(backend.find_car_by_id(-3).await.unwrap().is_none());
}

async fn update_replaces_drivers_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;
    let [d1, d2, d3] = [
        fixture.drivers[0].clone(),
        fixture.drivers[1].clone(),
        fixture.drivers[2].clone(),
    ];

    let created = backend
        .create_car(&Car::new("Panda", fixture.manufacturer.clone(), vec![d1, d2]))
        .await
        .unwrap();

    let mut changed = created.clone();
    changed.model = "Panda Cross".to_string();
    changed.manufacturer = fixture.other_manufacturer.clone();
    changed.drivers = vec![d3.clone()];

    let updated = backend.update_car(&changed).await.unwrap().unwrap();
    assert_eq!(updated, changed);

    let fetched = backend
        .find_car_by_id(created.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.model, "Panda Cross");
    assert_eq!(fetched.manufacturer, fixture.other_manufacturer);
    assert_eq!(fetched.drivers, vec![d3]);
}

async fn update_missing_car_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;

    let mut ghost = Car::new(
        "Ghost",
        fixture.manufacturer.clone(),
        vec![fixture.drivers[0].clone()],
    );
    ghost.id = Some(4242);

    assert!(backend.update_car(&ghost).await.unwrap().is_none());
    assert!(backend
        .find_cars_by_driver(fixture.drivers[0].id.unwrap())
        .await
        .unwrap()
        .is_empty());
}

async fn update_without_id_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;

    let car = Car::new("NoId", fixture.manufacturer, vec![fixture.drivers[0].clone()]);
    let err = backend.update_car(&car).await.unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));
}

async fn soft_delete_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;
    let driver = fixture.drivers[0].clone();

    let created = backend
        .create_car(&Car::new("V60", fixture.manufacturer.clone(), vec![driver.clone()]))
        .await
        .unwrap();
    let id = created.id.unwrap();

    assert!(backend.delete_car(id).await.unwrap());

    assert!(backend.find_car_by_id(id).await.unwrap().is_none());
    assert!(backend.find_all_cars().await.unwrap().is_empty());
    assert!(backend
        .find_cars_by_driver(driver.id.unwrap())
        .await
        .unwrap()
        .is_empty());

    // Deleted cars can no longer be updated
    assert!(backend.update_car(&created).await.unwrap().is_none());
}

async fn delete_missing_car_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();

    assert!(!backend.delete_car(777).await.unwrap());
    assert!(!backend.delete_car(0).await.unwrap());
}

async fn get_all_groups_rows_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;

    let first = backend
        .create_car(&Car::new(
            "S90",
            fixture.manufacturer.clone(),
            fixture.drivers.clone(),
        ))
        .await
        .unwrap();
    let second = backend
        .create_car(&Car::new(
            "500",
            fixture.other_manufacturer.clone(),
            vec![fixture.drivers[1].clone()],
        ))
        .await
        .unwrap();

    let cars = backend.find_all_cars().await.unwrap();

    assert_eq!(cars.len(), 2);
    assert_eq!(cars, vec![first, second]);
    assert_eq!(cars[0].drivers.len(), 3);
}

async fn driverless_car_is_not_listed_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;

    let lonely = backend
        .create_car(&Car::new("Lonely", fixture.manufacturer.clone(), Vec::new()))
        .await
        .unwrap();

    assert!(lonely.id.is_some());
    assert!(backend
        .find_car_by_id(lonely.id.unwrap())
        .await
        .unwrap()
        .is_none());
    assert!(backend.find_all_cars().await.unwrap().is_empty());
}

async fn get_all_by_driver_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;
    let [alice, bob, carol]: [Driver; 3] = [
        fixture.drivers[0].clone(),
        fixture.drivers[1].clone(),
        fixture.drivers[2].clone(),
    ];

    let shared = backend
        .create_car(&Car::new(
            "Tipo",
            fixture.other_manufacturer.clone(),
            vec![alice.clone(), bob.clone()],
        ))
        .await
        .unwrap();
    let bobs_own = backend
        .create_car(&Car::new("XC40", fixture.manufacturer.clone(), vec![bob.clone()]))
        .await
        .unwrap();
    backend
        .create_car(&Car::new("C40", fixture.manufacturer.clone(), vec![carol]))
        .await
        .unwrap();

    let alices = backend
        .find_cars_by_driver(alice.id.unwrap())
        .await
        .unwrap();
    assert_eq!(alices, vec![shared.clone()]);
    // The car keeps its complete driver list, not only the matching driver
    assert_eq!(alices[0].drivers, vec![alice, bob.clone()]);

    let bobs = backend.find_cars_by_driver(bob.id.unwrap()).await.unwrap();
    assert_eq!(bobs, vec![shared, bobs_own]);

    assert!(backend.find_cars_by_driver(9999).await.unwrap().is_empty());
}

async fn create_rolls_back_on_unknown_driver_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;

    let car = Car::new(
        "Broken",
        fixture.manufacturer.clone(),
        vec![fixture.drivers[0].clone(), Driver::with_id(9999, "Nobody", "NONE")],
    );

    let err = backend.create_car(&car).await.unwrap_err();
    assert_eq!(err.stage(), Some(Stage::LinkDrivers));

    // Neither the car row nor the first association survived
    assert!(backend
        .find_cars_by_driver(fixture.drivers[0].id.unwrap())
        .await
        .unwrap()
        .is_empty());
    assert!(backend.find_all_cars().await.unwrap().is_empty());
}

async fn update_rolls_back_on_unknown_driver_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;
    let driver = fixture.drivers[0].clone();

    let created = backend
        .create_car(&Car::new("Duster", fixture.manufacturer.clone(), vec![driver.clone()]))
        .await
        .unwrap();

    let mut changed = created.clone();
    changed.model = "Duster II".to_string();
    changed.drivers = vec![Driver::with_id(999, "Nobody", "NONE")];

    let err = backend.update_car(&changed).await.unwrap_err();
    assert_eq!(err.stage(), Some(Stage::LinkDrivers));

    // Row update and unlinking were both undone
    let fetched = backend
        .find_car_by_id(created.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.model, "Duster");
    assert_eq!(fetched.drivers, vec![driver]);
}

async fn create_rejects_unsaved_references_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;

    let unsaved_driver = Car::new(
        "Draft",
        fixture.manufacturer.clone(),
        vec![Driver::new("Unsaved", "LIC-0")],
    );
    assert!(matches!(
        backend.create_car(&unsaved_driver).await.unwrap_err(),
        AppError::BadRequest(_)
    ));

    let unsaved_manufacturer = Car::new(
        "Draft",
        car_registry::Manufacturer::new("Nowhere", "None"),
        vec![fixture.drivers[0].clone()],
    );
    assert!(matches!(
        backend.create_car(&unsaved_manufacturer).await.unwrap_err(),
        AppError::BadRequest(_)
    ));
}

async fn reference_lookups_test(db_type: TestDatabaseType) {
    let (backend, _test_db) = common::setup_test_backend(db_type).await.unwrap();
    let fixture = common::seed_fixture(backend.as_ref()).await;

    let manufacturers = backend.find_all_manufacturers().await.unwrap();
    assert_eq!(
        manufacturers,
        vec![fixture.manufacturer.clone(), fixture.other_manufacturer]
    );
    assert_eq!(
        backend
            .find_manufacturer_by_id(fixture.manufacturer.id.unwrap())
            .await
            .unwrap(),
        Some(fixture.manufacturer)
    );

    assert_eq!(backend.find_all_drivers().await.unwrap(), fixture.drivers);
    assert!(backend.find_driver_by_id(9999).await.unwrap().is_none());
}

matrix_test!(test_create_and_get, create_and_get_test);
matrix_test!(test_get_missing_car, get_missing_car_test);
matrix_test!(test_update_replaces_drivers, update_replaces_drivers_test);
matrix_test!(test_update_missing_car, update_missing_car_test);
matrix_test!(test_update_without_id, update_without_id_test);
matrix_test!(test_soft_delete, soft_delete_test);
matrix_test!(test_delete_missing_car, delete_missing_car_test);
matrix_test!(test_get_all_groups_rows, get_all_groups_rows_test);
matrix_test!(test_driverless_car_is_not_listed, driverless_car_is_not_listed_test);
matrix_test!(test_get_all_by_driver, get_all_by_driver_test);
matrix_test!(
    test_create_rolls_back_on_unknown_driver,
    create_rolls_back_on_unknown_driver_test
);
matrix_test!(
    test_update_rolls_back_on_unknown_driver,
    update_rolls_back_on_unknown_driver_test
);
matrix_test!(
    test_create_rejects_unsaved_references,
    create_rejects_unsaved_references_test
);
matrix_test!(test_reference_lookups, reference_lookups_test);
