// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: site snapshot store and port adapters
// - presentation: HTTP handlers and routing
// - application: ports, search services and use cases
// - domain: content read models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
