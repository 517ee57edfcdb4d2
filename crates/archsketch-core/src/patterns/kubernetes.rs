//! Cluster with nested pods, ingress, registry and stateful backing services.

use crate::classifier::PatternId;
use crate::flags::FlagRule;
use crate::model::Layer;
use crate::synthesis::{always, hub_to_many, link, path, unless_any, when, ComponentTemplate as C, EdgeStyle, PatternSpec};

const HTTP: EdgeStyle = EdgeStyle::new("api_call", "", "HTTP/8080");

pub static KUBERNETES: PatternSpec = PatternSpec {
    id: PatternId::Kubernetes,
    title: "Kubernetes Architecture",
    description: "Containerised workloads on a managed Kubernetes cluster",
    flags: &[
        FlagRule::new("has_ingress", &["ingress", "nginx", "traefik", "load balancer"]),
        FlagRule::new("has_cicd", &["ci/cd", "pipeline", "gitops", "argo", "flux", "github actions", "devops", "helm"]),
        FlagRule::new("has_registry", &["registry", "acr", "ecr", "docker hub", "harbor", "image"]),
        FlagRule::new("has_frontend", &["frontend", "web", "user interface"]),
        FlagRule::new("has_worker", &["worker", "job", "batch", "cron"]),
        FlagRule::new("has_mesh", &["service mesh", "istio", "linkerd"]),
        FlagRule::new("has_database", &["database", "sql", "postgres", "mysql", "mongo"]),
        FlagRule::new("has_cache", &["redis", "cache"]),
        FlagRule::new("has_volumes", &["volume", "persistent", "storage", "pvc"]),
        FlagRule::new("has_monitoring", &["monitoring", "prometheus", "grafana", "observability", "logging"]),
    ],
    tiers: &[Layer::Presentation, Layer::Network, Layer::Infrastructure, Layer::Data, Layer::Management],
    rules: &[
        always(C::new("users", "Users", "user", Layer::Presentation).tech("Browser / API Clients")),
        when("has_ingress", C::new("ingress", "Ingress Controller", "loadbalancer", Layer::Network)
            .tech("NGINX Ingress")
            .variants(&[("traefik", "Traefik"), ("application gateway", "Application Gateway Ingress Controller"), ("istio", "Istio Gateway")])),
        when("has_cicd", C::new("cicd", "CI/CD", "devops", Layer::Management)
            .tech("GitHub Actions")
            .variants(&[("argo", "Argo CD"), ("flux", "Flux"), ("azure devops", "Azure DevOps"), ("jenkins", "Jenkins"), ("gitlab", "GitLab CI")])),
        when("has_registry", C::new("registry", "Container Registry", "registry", Layer::Infrastructure)
            .icon("containers")
            .tech("Azure Container Registry")
            .variants(&[("ecr", "Amazon ECR"), ("harbor", "Harbor"), ("docker hub", "Docker Hub"), ("gcr", "Artifact Registry")])),
        always(C::new("cluster", "Kubernetes Cluster", "kubernetes", Layer::Infrastructure)
            .tech("Kubernetes")
            .variants(&[("aks", "Azure Kubernetes Service"), ("eks", "Amazon EKS"), ("gke", "Google Kubernetes Engine"), ("openshift", "Red Hat OpenShift"), ("k3s", "k3s")])
            .describe("Autoscaling node pools")),
        when("has_frontend", C::new("frontend_pod", "Frontend\nDeployment", "container", Layer::Infrastructure).tech("Pods")).inside("cluster", 0),
        always(C::new("backend_pod", "Backend\nDeployment", "container", Layer::Infrastructure).tech("Pods")).inside("cluster", 1),
        when("has_worker", C::new("worker_pod", "Worker\nDeployment", "container", Layer::Infrastructure).tech("Jobs / CronJobs")).inside("cluster", 2),
        when("has_mesh", C::new("mesh", "Service Mesh", "service_mesh", Layer::Infrastructure)
            .icon("networking")
            .tech("Istio")
            .variants(&[("linkerd", "Linkerd")])).inside("cluster", 3),
        when("has_database", C::new("database", "Database", "database", Layer::Data)
            .tech("Managed PostgreSQL")
            .variants(&[("mysql", "Managed MySQL"), ("mongo", "MongoDB"), ("cosmos", "Azure Cosmos DB"), ("sql server", "Azure SQL Database")])),
        when("has_cache", C::new("cache", "Cache", "cache", Layer::Data).tech("Redis")),
        when("has_volumes", C::new("volumes", "Persistent\nVolumes", "storage", Layer::Data)
            .tech("CSI Persistent Volumes")),
        unless_any(&["has_database", "has_cache", "has_volumes"], C::new("state", "Application\nState", "database", Layer::Data).tech("Managed Database")),
        when("has_monitoring", C::new("monitoring", "Monitoring", "monitoring", Layer::Management)
            .tech("Prometheus + Grafana")
            .variants(&[("azure monitor", "Azure Monitor Container Insights"), ("datadog", "Datadog")])),
    ],
    connections: &[
        path(&["users", "ingress", "frontend_pod", "backend_pod"], HTTP),
        link("worker_pod", "backend_pod", HTTP),
        link("cicd", "registry", EdgeStyle::new("deployment", "push image", "")),
        link("cicd", "cluster", EdgeStyle::new("deployment", "deploy", "kubectl / Helm")),
        link("registry", "cluster", EdgeStyle::new("deployment", "pull image", "")),
        link("backend_pod", "database", EdgeStyle::new("data_flow", "", "TCP/5432")),
        link("backend_pod", "cache", EdgeStyle::new("data_flow", "", "RESP/6379")),
        link("backend_pod", "state", EdgeStyle::new("data_flow", "", "")),
        link("worker_pod", "database", EdgeStyle::new("data_flow", "", "TCP/5432")),
        link("cluster", "volumes", EdgeStyle::new("data_flow", "mount", "CSI")),
        hub_to_many("monitoring", "container", EdgeStyle::new("monitoring", "scrape", "")),
    ],
    patterns: &["Container Orchestration", "Microservices"],
};
