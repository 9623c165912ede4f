//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables; each has a Model struct for
//! data and an Entity struct for operations.
//!
//! No relations (and therefore no foreign keys) are declared on purpose:
//! cross-entity references are plain id columns, deletes never cascade, and
//! historical rows (RDO items, cost entries, plan items) are expected to
//! outlive the reference data they point at.

pub mod bulletin_item;
pub mod company;
pub mod contract_index;
pub mod enums;
pub mod equipment;
pub mod equipment_cost;
pub mod index_revision;
pub mod measurement_bulletin;
pub mod monthly_plan;
pub mod plan_equipment;
pub mod plan_item;
pub mod project;
pub mod project_segment;
pub mod rdo;
pub mod rdo_impact;
pub mod rdo_item;

// Re-export specific types to avoid conflicts
pub use bulletin_item::{Column as BulletinItemColumn, Entity as BulletinItem, Model as BulletinItemModel};
pub use company::{Column as CompanyColumn, Entity as Company, Model as CompanyModel};
pub use contract_index::{
    Column as ContractIndexColumn, Entity as ContractIndex, Model as ContractIndexModel,
};
pub use enums::{
    CostType, EquipmentOwner, FleetStatus, ImpactType, IndexType, MeasurementType, RdoStatus,
};
pub use equipment::{Column as EquipmentColumn, Entity as Equipment, Model as EquipmentModel};
pub use equipment_cost::{
    Column as EquipmentCostColumn, Entity as EquipmentCost, Model as EquipmentCostModel,
};
pub use index_revision::{
    Column as IndexRevisionColumn, Entity as IndexRevision, Model as IndexRevisionModel,
};
pub use measurement_bulletin::{
    Column as MeasurementBulletinColumn, Entity as MeasurementBulletin,
    Model as MeasurementBulletinModel,
};
pub use monthly_plan::{
    Column as MonthlyPlanColumn, Entity as MonthlyPlan, Model as MonthlyPlanModel,
};
pub use plan_equipment::{
    Column as PlanEquipmentColumn, Entity as PlanEquipment, Model as PlanEquipmentModel,
};
pub use plan_item::{Column as PlanItemColumn, Entity as PlanItem, Model as PlanItemModel};
pub use project::{Column as ProjectColumn, Entity as Project, Model as ProjectModel};
pub use project_segment::{
    Column as ProjectSegmentColumn, Entity as ProjectSegment, Model as ProjectSegmentModel,
};
pub use rdo::{Column as RdoColumn, Entity as Rdo, Model as RdoModel};
pub use rdo_impact::{Column as RdoImpactColumn, Entity as RdoImpact, Model as RdoImpactModel};
pub use rdo_item::{Column as RdoItemColumn, Entity as RdoItem, Model as RdoItemModel};
