pub mod shared {
    pub mod core {
        pub mod clock;
    }
    pub mod infrastructure {
        pub mod keyed_locks;
        pub mod timeout;
    }
}

pub mod modules {
    pub mod time_entries {
        pub mod core {
            pub mod interval;
            pub mod iso_week;
            pub mod time_entry;
        }
        pub mod use_cases {
            pub mod decision;
            pub mod errors;
            pub mod write_path;

            pub mod start_tracking {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod stop_tracking {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod create_manual_entry {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod update_time_entry {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod delete_time_entry {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_time_entries_by_user {
                pub mod handler;
                pub mod projection;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod weekly_summary {
                pub mod handler;
                pub mod summary;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod sync_time_entries {
                pub mod command;
                pub mod handler;
                pub mod reconcile;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod entry_store;
                pub mod entry_store_in_memory;
            }
        }
    }
}

pub mod shell;
