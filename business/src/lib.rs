pub mod application {
    pub mod receipt {
        pub mod delete;
        pub mod extract;
        pub mod get_all;
        pub mod scan;
        pub mod stats;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod receipt {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod services;
        pub mod stats;
        pub mod value_objects;
        pub mod use_cases {
            pub mod delete;
            pub mod extract;
            pub mod get_all;
            pub mod scan;
            pub mod stats;
        }
    }
}
