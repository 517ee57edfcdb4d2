//! Application-tier patterns: the classic Azure web/API stack and its two
//! refinements, microservices and serverless.

use crate::classifier::PatternId;
use crate::flags::FlagRule;
use crate::model::Layer;
use crate::synthesis::{
    all_to_all, always, hub_to_many, link, path, unless_any, when, ComponentTemplate as C,
    EdgeStyle, PatternSpec,
};

const HTTPS: EdgeStyle = EdgeStyle::new("api_call", "", "HTTPS/443");
const SQL: EdgeStyle = EdgeStyle::new("data_flow", "", "TDS/1433");
const TELEMETRY: EdgeStyle = EdgeStyle::new("monitoring", "telemetry", "");
const AUTH: EdgeStyle = EdgeStyle::new("auth", "token validation", "OIDC");

pub static APPLICATION: PatternSpec = PatternSpec {
    id: PatternId::Application,
    title: "Application Architecture",
    description: "Web front end and API tier on managed application services",
    flags: &[
        FlagRule::new("has_webapp", &["web app", "app service", "frontend", "website", "portal"]),
        FlagRule::new("has_api", &["api", "backend", "rest"]),
        FlagRule::new("has_identity", &["entra", "azure ad", "identity", "auth", "login", "b2c"]),
        FlagRule::new("has_apim", &["api management", "apim"]),
        FlagRule::new("has_functions", &["function"]),
        FlagRule::new("has_logic_app", &["logic app", "workflow"]),
        FlagRule::new("has_service_bus", &["service bus", "queue", "event grid", "messaging"]),
        FlagRule::new("has_cache", &["redis", "cache"]),
        FlagRule::new("has_sql", &["sql"]),
        FlagRule::new("has_cosmos", &["cosmos", "nosql", "mongodb"]),
        FlagRule::new("has_storage", &["storage", "blob"]),
        FlagRule::new("has_insights", &["insights", "monitor", "logging"]),
    ],
    tiers: &[Layer::Presentation, Layer::Security, Layer::Application, Layer::Integration, Layer::Data, Layer::Management],
    rules: &[
        always(C::new("users", "Users", "user", Layer::Presentation).tech("Browser / Mobile")),
        always(C::new("web_app", "Web App", "webapp", Layer::Presentation)
            .tech("Azure App Service")
            .variants(&[("static web app", "Azure Static Web Apps"), ("react", "React SPA on App Service"), ("angular", "Angular SPA on App Service")])),
        when("has_identity", C::new("identity", "Identity", "identity", Layer::Security)
            .tech("Microsoft Entra ID")
            .variants(&[("b2c", "Azure AD B2C")])),
        when("has_apim", C::new("apim", "API Management", "gateway", Layer::Application).tech("Azure API Management")),
        always(C::new("api_app", "API App", "api", Layer::Application)
            .tech("Azure App Service")
            .variants(&[(".net", "ASP.NET Core on App Service"), ("node", "Node.js on App Service"), ("python", "Python on App Service"), ("java", "Java on App Service")])),
        when("has_functions", C::new("functions", "Azure Functions", "function", Layer::Application)
            .tech("Azure Functions")
            .describe("Consumption plan")),
        when("has_logic_app", C::new("logic_app", "Logic App", "integration", Layer::Integration).tech("Azure Logic Apps")),
        when("has_service_bus", C::new("service_bus", "Service Bus", "queue", Layer::Integration)
            .tech("Azure Service Bus")
            .variants(&[("event grid", "Azure Event Grid")])),
        when("has_cache", C::new("cache", "Cache", "cache", Layer::Data).tech("Azure Cache for Redis")),
        when("has_sql", C::new("sql", "SQL Database", "database", Layer::Data)
            .tech("Azure SQL Database")
            .variants(&[("postgres", "Azure Database for PostgreSQL"), ("mysql", "Azure Database for MySQL")])),
        when("has_cosmos", C::new("cosmos", "Cosmos DB", "database", Layer::Data).tech("Azure Cosmos DB")),
        when("has_storage", C::new("storage", "Blob Storage", "storage", Layer::Data).tech("Azure Blob Storage")),
        unless_any(&["has_sql", "has_cosmos"], C::new("app_db", "Application\nDatabase", "database", Layer::Data).tech("Azure SQL Database")),
        when("has_insights", C::new("insights", "Application\nInsights", "monitoring", Layer::Management).tech("Azure Application Insights")),
    ],
    connections: &[
        link("users", "web_app", EdgeStyle::new("user_flow", "", "HTTPS/443")),
        link("identity", "web_app", AUTH),
        link("web_app", "apim", HTTPS),
        link("apim", "api_app", HTTPS),
        all_to_all("webapp", "api", HTTPS),
        link("api_app", "functions", HTTPS),
        path(&["api_app", "service_bus", "functions"], EdgeStyle::new("message_flow", "", "AMQP")),
        link("logic_app", "service_bus", EdgeStyle::new("message_flow", "", "AMQP")),
        link("api_app", "cache", EdgeStyle::new("data_flow", "", "RESP/6380")),
        all_to_all("api", "database", SQL),
        link("functions", "storage", EdgeStyle::new("data_flow", "", "HTTPS/443")),
        hub_to_many("insights", "api", TELEMETRY),
        hub_to_many("insights", "webapp", TELEMETRY),
    ],
    patterns: &["N-Tier", "Layered Architecture"],
};

const GRPC: EdgeStyle = EdgeStyle::new("api_call", "", "gRPC");
const EVENTS: EdgeStyle = EdgeStyle::new("message_flow", "events", "AMQP");

pub static MICROSERVICES: PatternSpec = PatternSpec {
    id: PatternId::Microservices,
    title: "Microservices Architecture",
    description: "Independently deployable services behind a gateway, talking over a broker",
    flags: &[
        FlagRule::new("has_identity", &["identity", "auth", "oauth", "entra", "keycloak"]),
        FlagRule::new("has_mesh", &["service mesh", "istio", "linkerd", "dapr"]),
        FlagRule::new("has_broker", &["kafka", "rabbitmq", "service bus", "event", "queue", "broker"]),
        FlagRule::new("has_cache", &["redis", "cache"]),
        FlagRule::new("has_db_per_service", &["database per service", "db per service", "polyglot", "own database"]),
        FlagRule::new("has_observability", &["observability", "monitoring", "tracing", "prometheus", "grafana", "insights"]),
    ],
    tiers: &[Layer::Presentation, Layer::Network, Layer::Security, Layer::Application, Layer::Integration, Layer::Data, Layer::Management],
    rules: &[
        always(C::new("clients", "Clients", "user", Layer::Presentation).tech("Web / Mobile")),
        always(C::new("api_gateway", "API Gateway", "gateway", Layer::Network)
            .tech("Azure API Management")
            .variants(&[("kong", "Kong"), ("nginx", "NGINX"), ("ocelot", "Ocelot"), ("aws", "Amazon API Gateway")])),
        when("has_identity", C::new("identity", "Identity Service", "identity", Layer::Security)
            .tech("Microsoft Entra ID")
            .variants(&[("keycloak", "Keycloak"), ("auth0", "Auth0")])),
        always(C::new("svc_users", "Users Service", "api", Layer::Application).tech("Containerized Service")),
        always(C::new("svc_orders", "Orders Service", "api", Layer::Application).tech("Containerized Service")),
        always(C::new("svc_catalog", "Catalog Service", "api", Layer::Application).tech("Containerized Service")),
        when("has_mesh", C::new("mesh", "Service Mesh", "service_mesh", Layer::Infrastructure)
            .icon("networking")
            .tech("Istio")
            .variants(&[("linkerd", "Linkerd"), ("dapr", "Dapr")])),
        when("has_broker", C::new("broker", "Message Broker", "queue", Layer::Integration)
            .tech("Azure Service Bus")
            .variants(&[("kafka", "Apache Kafka"), ("rabbitmq", "RabbitMQ"), ("event hub", "Azure Event Hubs")])),
        when("has_cache", C::new("cache", "Distributed Cache", "cache", Layer::Data).tech("Redis")),
        when("has_db_per_service", C::new("users_db", "Users DB", "database", Layer::Data).tech("Azure SQL Database")),
        when("has_db_per_service", C::new("orders_db", "Orders DB", "database", Layer::Data).tech("Azure Cosmos DB")),
        when("has_db_per_service", C::new("catalog_db", "Catalog DB", "database", Layer::Data).tech("Azure Database for PostgreSQL")),
        unless_any(&["has_db_per_service"], C::new("shared_db", "Shared Database", "database", Layer::Data)
            .tech("Azure SQL Database")
            .variants(&[("postgres", "Azure Database for PostgreSQL"), ("mongodb", "MongoDB")])),
        when("has_observability", C::new("observability", "Observability", "monitoring", Layer::Management)
            .tech("Azure Monitor")
            .variants(&[("prometheus", "Prometheus + Grafana"), ("grafana", "Prometheus + Grafana"), ("jaeger", "Jaeger")])),
    ],
    connections: &[
        link("clients", "api_gateway", EdgeStyle::new("user_flow", "", "HTTPS/443")),
        link("identity", "api_gateway", AUTH),
        hub_to_many("api_gateway", "api", HTTPS),
        link("svc_orders", "svc_users", GRPC),
        link("svc_orders", "svc_catalog", GRPC),
        hub_to_many("mesh", "api", EdgeStyle::new("network_flow", "sidecar", "mTLS")),
        link("svc_orders", "broker", EVENTS),
        link("broker", "svc_users", EVENTS),
        link("broker", "svc_catalog", EVENTS),
        link("svc_catalog", "cache", EdgeStyle::new("data_flow", "", "RESP/6380")),
        link("svc_users", "users_db", SQL),
        link("svc_orders", "orders_db", EdgeStyle::new("data_flow", "", "HTTPS/443")),
        link("svc_catalog", "catalog_db", EdgeStyle::new("data_flow", "", "TCP/5432")),
        link("svc_users", "shared_db", SQL),
        link("svc_orders", "shared_db", SQL),
        link("svc_catalog", "shared_db", SQL),
        hub_to_many("observability", "api", TELEMETRY),
    ],
    patterns: &["Microservices", "API Gateway", "Event-Driven"],
};

pub static SERVERLESS: PatternSpec = PatternSpec {
    id: PatternId::Serverless,
    title: "Serverless Architecture",
    description: "Event-driven functions with managed storage and no servers to operate",
    flags: &[
        FlagRule::new("has_api", &["api", "http", "rest", "webhook"]),
        FlagRule::new("has_events", &["event", "queue", "service bus", "event grid", "sqs", "pubsub"]),
        FlagRule::new("has_timer", &["timer", "schedule", "cron", "nightly"]),
        FlagRule::new("has_nosql", &["cosmos", "dynamo", "nosql", "firestore"]),
        FlagRule::new("has_storage", &["storage", "blob", "s3", "bucket"]),
        FlagRule::new("has_durable", &["durable", "orchestrat", "step function", "workflow"]),
    ],
    tiers: &[Layer::Presentation, Layer::Network, Layer::Application, Layer::Integration, Layer::Data, Layer::Management],
    rules: &[
        always(C::new("clients", "Clients", "user", Layer::Presentation).tech("Web / Mobile")),
        when("has_api", C::new("api_gateway", "API Gateway", "gateway", Layer::Network)
            .tech("Azure API Management")
            .variants(&[("aws", "Amazon API Gateway"), ("lambda", "Amazon API Gateway")])),
        always(C::new("fn_http", "HTTP Function", "function", Layer::Application)
            .tech("Azure Functions")
            .variants(&[("lambda", "AWS Lambda"), ("aws", "AWS Lambda"), ("cloud function", "Google Cloud Functions")])),
        when("has_events", C::new("events", "Event Bus", "queue", Layer::Integration)
            .tech("Azure Event Grid")
            .variants(&[("service bus", "Azure Service Bus"), ("sqs", "Amazon SQS"), ("eventbridge", "Amazon EventBridge"), ("pubsub", "Google Pub/Sub")])),
        when("has_events", C::new("fn_worker", "Event Function", "function", Layer::Application)
            .tech("Azure Functions")
            .variants(&[("lambda", "AWS Lambda"), ("aws", "AWS Lambda")])),
        when("has_timer", C::new("fn_timer", "Timer Function", "function", Layer::Application)
            .tech("Azure Functions")
            .describe("Scheduled trigger")),
        when("has_durable", C::new("state_store", "Orchestration\nState", "integration", Layer::Integration)
            .tech("Durable Functions")
            .variants(&[("step function", "AWS Step Functions")])),
        when("has_nosql", C::new("nosql", "NoSQL Store", "database", Layer::Data)
            .tech("Azure Cosmos DB")
            .variants(&[("dynamo", "Amazon DynamoDB"), ("firestore", "Google Firestore")])),
        unless_any(&["has_nosql"], C::new("table_store", "Table Storage", "database", Layer::Data).tech("Azure Table Storage")),
        when("has_storage", C::new("storage", "Object Storage", "storage", Layer::Data)
            .tech("Azure Blob Storage")
            .variants(&[("s3", "Amazon S3")])),
        always(C::new("monitoring", "Monitoring", "monitoring", Layer::Management)
            .tech("Azure Application Insights")
            .variants(&[("aws", "Amazon CloudWatch"), ("lambda", "Amazon CloudWatch")])),
    ],
    connections: &[
        path(&["clients", "api_gateway", "fn_http"], HTTPS),
        path(&["fn_http", "events", "fn_worker"], EVENTS),
        link("fn_worker", "state_store", EdgeStyle::new("data_flow", "", "")),
        all_to_all("function", "database", EdgeStyle::new("data_flow", "", "HTTPS/443")),
        link("fn_http", "storage", EdgeStyle::new("data_flow", "", "HTTPS/443")),
        link("fn_worker", "storage", EdgeStyle::new("data_flow", "", "HTTPS/443")),
        hub_to_many("monitoring", "function", TELEMETRY),
    ],
    patterns: &["Serverless", "Event-Driven"],
};
