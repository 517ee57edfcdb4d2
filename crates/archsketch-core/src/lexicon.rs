//! Keyword → component lookup table.
//!
//! The lexicon is plain data: every entry maps a family of lowercase
//! keywords to the component it stands for. Callers take a [`Lexicon`] by
//! value so tests can swap in a minimal table.

use crate::model::Layer;

/// Bumped whenever entries are added, removed or reordered, since entry order
/// drives the generic fallback.
pub const LEXICON_VERSION: &str = "3";

/// Used when a component kind has no icon mapping of its own.
pub const DEFAULT_ICON_CATEGORY: &str = "general";

#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    pub key: &'static str,
    pub keywords: &'static [&'static str],
    pub name: &'static str,
    pub kind: &'static str,
    pub icon_category: &'static str,
    pub technology: &'static str,
    pub layer: Layer,
}

impl LexiconEntry {
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    version: &'static str,
    entries: Vec<LexiconEntry>,
    kind_icons: &'static [(&'static str, &'static str)],
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    pub fn new(entries: Vec<LexiconEntry>) -> Self {
        Self {
            version: LEXICON_VERSION,
            entries,
            kind_icons: KIND_ICONS,
        }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN.to_vec())
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn entry(&self, key: &str) -> Option<&LexiconEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Entries mentioned by `text` (already lowercased), in table order.
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a LexiconEntry> {
        self.entries.iter().filter(move |e| e.matches(text))
    }

    /// Icon category for a component kind. Never empty.
    pub fn icon_for(&self, kind: &str) -> &'static str {
        let kind = kind.trim().to_lowercase();
        self.kind_icons
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, icon)| *icon)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.kind == kind)
                    .map(|e| e.icon_category)
            })
            .filter(|icon| !icon.is_empty())
            .unwrap_or(DEFAULT_ICON_CATEGORY)
    }
}

const KIND_ICONS: &[(&str, &str)] = &[
    ("network", "networking"),
    ("subnet", "networking"),
    ("gateway", "networking"),
    ("loadbalancer", "networking"),
    ("dns", "networking"),
    ("cdn", "networking"),
    ("security", "security"),
    ("identity", "identity"),
    ("database", "databases"),
    ("cache", "databases"),
    ("storage", "storage"),
    ("api", "web"),
    ("webapp", "web"),
    ("function", "compute"),
    ("compute", "compute"),
    ("container", "containers"),
    ("kubernetes", "containers"),
    ("queue", "integration"),
    ("integration", "integration"),
    ("analytics", "analytics"),
    ("search", "analytics"),
    ("monitoring", "monitoring"),
    ("subscription", "management"),
    ("management", "management"),
    ("devops", "devops"),
    ("cloud", "cloud"),
    ("onprem", "hybrid"),
    ("user", "users"),
    ("external", "general"),
];

macro_rules! entry {
    ($key:literal, [$($kw:literal),+ $(,)?], $name:literal, $kind:literal, $icon:literal, $tech:literal, $layer:ident) => {
        LexiconEntry {
            key: $key,
            keywords: &[$($kw),+],
            name: $name,
            kind: $kind,
            icon_category: $icon,
            technology: $tech,
            layer: Layer::$layer,
        }
    };
}

// Ordered front to back so the generic chain reads client → edge → app → data.
const BUILTIN: &[LexiconEntry] = &[
    entry!("mobile", ["mobile", "ios", "android", "movil", "móvil"], "Mobile App", "webapp", "web", "Mobile Client", Presentation),
    entry!("frontend", ["frontend", "front-end", "web app", "website", "single page", "react", "angular", "vue", "portal", "sitio web"], "Web Frontend", "webapp", "web", "Web Application", Presentation),
    entry!("cdn", ["cdn", "content delivery"], "CDN", "cdn", "networking", "Content Delivery Network", Network),
    entry!("waf", ["waf", "web application firewall"], "Web Application\nFirewall", "security", "security", "WAF", Security),
    entry!("load_balancer", ["load balancer", "balanceador"], "Load Balancer", "loadbalancer", "networking", "Layer 7 Load Balancer", Network),
    entry!("api_gateway", ["api gateway", "api management", "apim"], "API Gateway", "gateway", "networking", "API Gateway", Network),
    entry!("auth", ["auth", "login", "oauth", "sso", "identity", "keycloak", "autenticacion", "autenticación"], "Identity Provider", "identity", "identity", "OAuth 2.0 / OIDC", Security),
    entry!("backend", ["backend", "back-end", "api", "rest", "graphql", "server", "servidor"], "Backend API", "api", "web", "REST API", Application),
    entry!("microservice", ["microservice", "microservicio"], "Microservice", "api", "web", "Containerized Service", Application),
    entry!("functions", ["lambda", "serverless", "function", "funcion", "función"], "Functions", "function", "compute", "Serverless Functions", Application),
    entry!("worker", ["worker", "background job", "cron", "scheduler", "batch"], "Background Worker", "compute", "compute", "Worker Service", Application),
    entry!("queue", ["queue", "kafka", "rabbitmq", "service bus", "sqs", "message broker", "event bus", "pubsub", "pub/sub", "cola"], "Message Queue", "queue", "integration", "Message Broker", Integration),
    entry!("notifications", ["email", "notification", "sms", "twilio", "sendgrid", "notificacion"], "Notification Service", "integration", "integration", "Email / SMS Gateway", Integration),
    entry!("payments", ["payment", "stripe", "paypal", "pago"], "Payment Provider", "external", "general", "Payment Gateway", External),
    entry!("cache", ["cache", "redis", "memcached"], "Cache", "cache", "databases", "Redis", Data),
    entry!("database", ["database", "sql", "postgres", "mysql", "mongodb", "mariadb", "base de datos"], "Database", "database", "databases", "Relational Database", Data),
    entry!("search", ["elasticsearch", "opensearch", "search", "busqueda", "búsqueda"], "Search Index", "search", "analytics", "Elasticsearch", Data),
    entry!("storage", ["storage", "blob", "s3", "bucket", "file share", "almacenamiento"], "Object Storage", "storage", "storage", "Object Storage", Data),
    entry!("etl", ["etl", "data factory", "data pipeline", "glue", "dataflow", "ingest"], "ETL Pipeline", "integration", "integration", "Data Integration", Integration),
    entry!("warehouse", ["data warehouse", "warehouse", "bigquery", "snowflake", "synapse", "redshift"], "Data Warehouse", "analytics", "analytics", "Data Warehouse", Analytics),
    entry!("ml", ["machine learning", "ml model", "ai model", "openai", "llm", "inteligencia artificial"], "AI / ML Service", "analytics", "analytics", "Model Serving", Analytics),
    entry!("reporting", ["dashboard", "report", "power bi", "looker", "tableau"], "Reporting", "analytics", "analytics", "BI Dashboards", Analytics),
    entry!("monitoring", ["monitoring", "logging", "observability", "prometheus", "grafana", "application insights", "cloudwatch", "log analytics", "monitoreo"], "Monitoring", "monitoring", "monitoring", "Observability Stack", Management),
    entry!("dns", ["dns", "route 53", "route53"], "DNS", "dns", "networking", "Managed DNS", Network),
    entry!("vpn", ["vpn", "expressroute", "direct connect", "interconnect"], "VPN Gateway", "gateway", "networking", "Site-to-Site VPN", Network),
    entry!("firewall", ["firewall", "cortafuegos"], "Firewall", "security", "security", "Network Firewall", Security),
    entry!("secrets", ["key vault", "secret", "kms", "vault"], "Secrets Vault", "security", "security", "Secrets Management", Security),
    entry!("kubernetes", ["kubernetes", "k8s", "aks", "eks", "gke"], "Kubernetes Cluster", "kubernetes", "containers", "Kubernetes", Infrastructure),
    entry!("container", ["docker", "container", "contenedor"], "Container Runtime", "container", "containers", "Docker", Infrastructure),
    entry!("vm", ["virtual machine", "máquina virtual", "maquina virtual", "ec2", "compute engine"], "Virtual Machines", "compute", "compute", "Virtual Machine", Infrastructure),
    entry!("cicd", ["ci/cd", "devops", "github actions", "jenkins", "gitlab", "deploy"], "CI/CD Pipeline", "devops", "devops", "Build & Release", Management),
];
