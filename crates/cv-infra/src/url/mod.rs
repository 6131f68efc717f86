mod object_url_registry;

pub use object_url_registry::InMemoryObjectUrlRegistry;
