use common::prelude::{IdentityService, TreeManager};

use crate::database::{Database, SqliteDepartmentProvider, SqliteUserProvider};
use crate::drive::DriveGateway;

/// Main service state - orchestrates all components
#[derive(Clone)]
pub struct ServiceState {
    database: Database,
    tree: TreeManager<SqliteDepartmentProvider>,
    identity: IdentityService<SqliteUserProvider>,
    drive: DriveGateway,
}

impl ServiceState {
    pub fn new(database: Database, drive: DriveGateway) -> Self {
        let tree = TreeManager::new(SqliteDepartmentProvider::new(database.clone()));
        let identity = IdentityService::new(SqliteUserProvider::new(database.clone()));
        Self {
            database,
            tree,
            identity,
            drive,
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn tree(&self) -> &TreeManager<SqliteDepartmentProvider> {
        &self.tree
    }

    pub fn identity(&self) -> &IdentityService<SqliteUserProvider> {
        &self.identity
    }

    pub fn drive(&self) -> &DriveGateway {
        &self.drive
    }
}
