use std::{collections::HashMap, sync::Arc};

use futures::lock::Mutex;

use crate::{RatelimitEvent, Report};

database_derived!(
    /// Reference implementation
    #[derive(Default)]
    pub struct ReferenceDb {
        pub reports: Arc<Mutex<HashMap<String, Report>>>,
        pub ratelimit_events: Arc<Mutex<HashMap<String, RatelimitEvent>>>,
    }
);
