//! Single-provider patterns for AWS and Google Cloud. Both put their
//! compute inside one VPC container so the network boundary is visible.

use crate::classifier::PatternId;
use crate::flags::FlagRule;
use crate::model::Layer;
use crate::synthesis::{always, hub_to_many, link, path, unless_any, when, ComponentTemplate as C, EdgeStyle, PatternSpec};

const HTTPS: EdgeStyle = EdgeStyle::new("api_call", "", "HTTPS/443");
const DATA: EdgeStyle = EdgeStyle::new("data_flow", "", "");
const METRICS: EdgeStyle = EdgeStyle::new("monitoring", "metrics", "");

pub static AWS: PatternSpec = PatternSpec {
    id: PatternId::Aws,
    title: "AWS Architecture",
    description: "Workloads in a VPC fronted by AWS edge services",
    flags: &[
        FlagRule::new("has_cloudfront", &["cloudfront", "cdn"]),
        FlagRule::new("has_waf", &["waf", "shield"]),
        FlagRule::new("has_alb", &["alb", "elb", "load balancer"]),
        FlagRule::new("has_api_gateway", &["api gateway", "rest api", "http api"]),
        FlagRule::new("has_ec2", &["ec2", "virtual machine", "auto scaling"]),
        FlagRule::new("has_ecs", &["ecs", "fargate", "eks", "container"]),
        FlagRule::new("has_lambda", &["lambda", "serverless"]),
        FlagRule::new("has_rds", &["rds", "aurora", "postgres", "mysql"]),
        FlagRule::new("has_dynamodb", &["dynamo"]),
        FlagRule::new("has_s3", &["s3", "bucket", "storage"]),
        FlagRule::new("has_sqs", &["sqs", "sns", "queue", "eventbridge"]),
        FlagRule::new("has_cloudwatch", &["cloudwatch", "monitoring", "logging", "x-ray"]),
    ],
    tiers: &[Layer::Presentation, Layer::Network, Layer::Security, Layer::Application, Layer::Integration, Layer::Data, Layer::Management],
    rules: &[
        always(C::new("users", "Users", "user", Layer::Presentation).tech("Browser / Mobile")),
        when("has_cloudfront", C::new("cloudfront", "CloudFront", "cdn", Layer::Network).tech("Amazon CloudFront")),
        when("has_waf", C::new("waf", "AWS WAF", "security", Layer::Security)
            .tech("AWS WAF")
            .variants(&[("shield", "AWS WAF + Shield Advanced")])),
        when("has_alb", C::new("alb", "Application\nLoad Balancer", "loadbalancer", Layer::Network)
            .tech("Elastic Load Balancing")
            .variants(&[("nlb", "Network Load Balancer")])),
        when("has_api_gateway", C::new("api_gateway", "API Gateway", "gateway", Layer::Network).tech("Amazon API Gateway")),
        always(C::new("vpc", "VPC\n10.0.0.0/16", "network", Layer::Application)
            .tech("Amazon VPC")
            .describe("Private subnets across two availability zones")),
        when("has_ec2", C::new("ec2", "EC2 Instances", "compute", Layer::Application)
            .tech("Amazon EC2")
            .describe("Auto Scaling group")).inside("vpc", 0),
        when("has_ecs", C::new("containers", "Container\nService", "container", Layer::Application)
            .tech("Amazon ECS on Fargate")
            .variants(&[("eks", "Amazon EKS")])).inside("vpc", 1),
        unless_any(&["has_ec2", "has_ecs", "has_lambda"], C::new("ec2_default", "Application\nServers", "compute", Layer::Application)
            .tech("Amazon EC2")).inside("vpc", 0),
        when("has_rds", C::new("rds", "RDS Database", "database", Layer::Data)
            .tech("Amazon RDS")
            .variants(&[("aurora", "Amazon Aurora"), ("postgres", "Amazon RDS for PostgreSQL"), ("mysql", "Amazon RDS for MySQL")])
            .describe("Multi-AZ")).inside("vpc", 2),
        when("has_lambda", C::new("lambda", "Lambda Functions", "function", Layer::Application).tech("AWS Lambda")),
        when("has_sqs", C::new("sqs", "Messaging", "queue", Layer::Integration)
            .tech("Amazon SQS")
            .variants(&[("sns", "Amazon SNS"), ("eventbridge", "Amazon EventBridge")])),
        when("has_dynamodb", C::new("dynamodb", "DynamoDB", "database", Layer::Data).tech("Amazon DynamoDB")),
        when("has_s3", C::new("s3", "S3 Bucket", "storage", Layer::Data).tech("Amazon S3")),
        when("has_cloudwatch", C::new("cloudwatch", "CloudWatch", "monitoring", Layer::Management).tech("Amazon CloudWatch")),
    ],
    connections: &[
        path(&["users", "cloudfront", "waf", "alb", "vpc"], HTTPS),
        link("users", "api_gateway", HTTPS),
        link("api_gateway", "lambda", EdgeStyle::new("api_call", "invoke", "")),
        link("ec2", "rds", EdgeStyle::new("data_flow", "SQL", "")),
        link("containers", "rds", EdgeStyle::new("data_flow", "SQL", "")),
        link("ec2_default", "rds", EdgeStyle::new("data_flow", "SQL", "")),
        link("containers", "sqs", DATA),
        link("lambda", "sqs", DATA),
        link("lambda", "dynamodb", DATA),
        link("lambda", "s3", DATA),
        link("ec2", "s3", DATA),
        hub_to_many("cloudwatch", "compute", METRICS),
        hub_to_many("cloudwatch", "container", METRICS),
        hub_to_many("cloudwatch", "function", METRICS),
    ],
    patterns: &["AWS Well-Architected", "Multi-AZ"],
};

pub static GCP: PatternSpec = PatternSpec {
    id: PatternId::Gcp,
    title: "Google Cloud Architecture",
    description: "Workloads in a VPC behind Cloud Load Balancing",
    flags: &[
        FlagRule::new("has_lb", &["load balanc", "cloud cdn"]),
        FlagRule::new("has_armor", &["armor", "waf"]),
        FlagRule::new("has_gke", &["gke", "kubernetes"]),
        FlagRule::new("has_compute", &["compute engine", "virtual machine", "vm"]),
        FlagRule::new("has_cloud_run", &["cloud run", "app engine"]),
        FlagRule::new("has_functions", &["cloud function", "function"]),
        FlagRule::new("has_cloud_sql", &["cloud sql", "spanner", "postgres", "mysql"]),
        FlagRule::new("has_firestore", &["firestore", "bigtable", "datastore"]),
        FlagRule::new("has_gcs", &["cloud storage", "gcs", "bucket"]),
        FlagRule::new("has_pubsub", &["pub/sub", "pubsub", "queue"]),
        FlagRule::new("has_bigquery", &["bigquery", "analytics", "warehouse"]),
        FlagRule::new("has_monitoring", &["monitoring", "logging", "operations suite", "stackdriver"]),
    ],
    tiers: &[Layer::Presentation, Layer::Network, Layer::Application, Layer::Integration, Layer::Data, Layer::Analytics, Layer::Management],
    rules: &[
        always(C::new("users", "Users", "user", Layer::Presentation).tech("Browser / Mobile")),
        when("has_lb", C::new("load_balancer", "Cloud Load\nBalancing", "loadbalancer", Layer::Network).tech("Cloud Load Balancing")),
        when("has_armor", C::new("armor", "Cloud Armor", "security", Layer::Network).tech("Google Cloud Armor")),
        always(C::new("vpc", "VPC Network", "network", Layer::Application)
            .tech("Google VPC")
            .describe("Regional subnets with Private Google Access")),
        when("has_gke", C::new("gke", "GKE Cluster", "container", Layer::Application)
            .tech("Google Kubernetes Engine")
            .variants(&[("autopilot", "GKE Autopilot")])).inside("vpc", 0),
        when("has_compute", C::new("compute", "Compute Engine", "compute", Layer::Application)
            .tech("Compute Engine")
            .describe("Managed instance group")).inside("vpc", 1),
        unless_any(&["has_gke", "has_compute", "has_cloud_run", "has_functions"], C::new("compute_default", "Application\nServers", "compute", Layer::Application)
            .tech("Compute Engine")).inside("vpc", 0),
        when("has_cloud_sql", C::new("cloud_sql", "Cloud SQL", "database", Layer::Data)
            .tech("Cloud SQL")
            .variants(&[("spanner", "Cloud Spanner"), ("postgres", "Cloud SQL for PostgreSQL"), ("mysql", "Cloud SQL for MySQL")])
            .describe("Private IP")).inside("vpc", 2),
        when("has_cloud_run", C::new("cloud_run", "Cloud Run", "container", Layer::Application)
            .tech("Cloud Run")
            .variants(&[("app engine", "App Engine")])),
        when("has_functions", C::new("functions", "Cloud Functions", "function", Layer::Application).tech("Cloud Functions")),
        when("has_pubsub", C::new("pubsub", "Pub/Sub", "queue", Layer::Integration).tech("Google Cloud Pub/Sub")),
        when("has_firestore", C::new("firestore", "Firestore", "database", Layer::Data)
            .tech("Firestore")
            .variants(&[("bigtable", "Cloud Bigtable")])),
        when("has_gcs", C::new("gcs", "Cloud Storage", "storage", Layer::Data).tech("Google Cloud Storage")),
        when("has_bigquery", C::new("bigquery", "BigQuery", "analytics", Layer::Analytics).tech("BigQuery")),
        when("has_monitoring", C::new("monitoring", "Cloud Monitoring", "monitoring", Layer::Management).tech("Google Cloud Operations Suite")),
    ],
    connections: &[
        path(&["users", "armor", "load_balancer", "vpc"], HTTPS),
        link("users", "cloud_run", HTTPS),
        link("gke", "cloud_sql", EdgeStyle::new("data_flow", "SQL", "")),
        link("compute", "cloud_sql", EdgeStyle::new("data_flow", "SQL", "")),
        link("compute_default", "cloud_sql", EdgeStyle::new("data_flow", "SQL", "")),
        link("cloud_run", "cloud_sql", EdgeStyle::new("data_flow", "SQL", "")),
        link("gke", "pubsub", DATA),
        link("cloud_run", "pubsub", DATA),
        link("pubsub", "functions", EdgeStyle::new("message_flow", "push", "")),
        link("functions", "firestore", DATA),
        link("functions", "gcs", DATA),
        link("gke", "gcs", DATA),
        link("gcs", "bigquery", EdgeStyle::new("data_flow", "load", "")),
        link("pubsub", "bigquery", EdgeStyle::new("data_flow", "stream", "")),
        hub_to_many("monitoring", "compute", METRICS),
        hub_to_many("monitoring", "container", METRICS),
        hub_to_many("monitoring", "function", METRICS),
    ],
    patterns: &["Google Cloud Architecture Framework"],
};
