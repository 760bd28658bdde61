pub mod geometry;
pub mod heading;
pub mod models;
pub mod pathfinder;
pub mod rules;
pub mod scheduler;
pub mod validation;
pub mod zones;

pub use geometry::{distance, is_close, GeometryError, Polygon, Position};
pub use heading::{next_position, Heading, STEP_LENGTH};
pub use models::{
    DroneMove, InvalidReason, MenuItem, Order, OrderError, OrderOutcome, OrderRecord, Restaurant,
    RestaurantRef,
};
pub use pathfinder::{NoRoute, PathFinder, Route, RouteStep};
pub use rules::{FlightRules, APPLETON_TOWER};
pub use scheduler::{deliver_orders, DeliveryScheduler, Drone, ScheduleReport};
pub use validation::{
    is_card_number_valid, is_cvv_valid, is_expiry_valid, validate_order, validate_orders,
    DELIVERY_CHARGE_PENCE, MAX_ORDER_ITEMS,
};
pub use zones::{MoveCheck, MoveRejection, NoFlyZone, ZoneMap};
