pub mod application {
    pub mod suggestion {
        pub mod generate;
        pub mod get;
        pub mod in_flight;
        pub mod refresh;
        pub mod scheduler;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod profile {
        pub mod model;
        pub mod repository;
    }
    pub mod suggestion {
        pub mod cadence;
        pub mod category;
        pub mod errors;
        pub mod history;
        pub mod keywords;
        pub mod model;
        pub mod prompt;
        pub mod repository;
        pub mod retry;
        pub mod services;
        pub mod settings;
        pub mod store;
        pub mod validation;
        pub mod use_cases {
            pub mod generate;
            pub mod get;
            pub mod refresh;
        }
    }
}
