//! Ingestion to lake to warehouse to reporting, with optional ML and streaming.

use crate::classifier::PatternId;
use crate::flags::FlagRule;
use crate::model::Layer;
use crate::synthesis::{always, link, path, unless_any, when, ComponentTemplate as C, EdgeStyle, PatternSpec};

const PIPELINE: EdgeStyle = EdgeStyle::new("data_flow", "", "");
const INGEST: EdgeStyle = EdgeStyle::new("data_flow", "ingest", "");
const LINEAGE: EdgeStyle = EdgeStyle::new("governance", "catalog", "");

pub static DATA: PatternSpec = PatternSpec {
    id: PatternId::Data,
    title: "Data Architecture",
    description: "Ingestion into a data lake, processed in stages and served to analytics",
    flags: &[
        FlagRule::new("has_sql", &["sql"]),
        FlagRule::new("has_cosmos", &["cosmos", "nosql"]),
        FlagRule::new("has_streaming", &["stream", "event hub", "kafka", "real-time", "real time", "tiempo real", "iot"]),
        FlagRule::new("has_databricks", &["databricks", "spark"]),
        FlagRule::new("has_synapse", &["synapse", "warehouse", "fabric"]),
        FlagRule::new("has_ml", &["machine learning", "azure ml", " ml ", " ai ", "prediction", "forecast", "inteligencia artificial"]),
        FlagRule::new("has_powerbi", &["power bi", "report", "dashboard", "bi "]),
        FlagRule::new("has_governance", &["purview", "governance", "catalog", "lineage"]),
    ],
    tiers: &[Layer::External, Layer::Integration, Layer::Data, Layer::Analytics, Layer::Presentation, Layer::Management],
    rules: &[
        unless_any(&["has_sql", "has_cosmos"], C::new("sources", "Data Sources", "database", Layer::External).tech("Operational Systems")),
        when("has_sql", C::new("sql_source", "SQL Database", "database", Layer::External)
            .tech("Azure SQL Database")
            .variants(&[("sql server", "SQL Server"), ("postgres", "PostgreSQL")])),
        when("has_cosmos", C::new("cosmos_source", "Cosmos DB", "database", Layer::External).tech("Azure Cosmos DB")),
        when("has_streaming", C::new("streaming", "Event Streaming", "queue", Layer::Integration)
            .tech("Azure Event Hubs")
            .variants(&[("kafka", "Apache Kafka"), ("iot", "Azure IoT Hub")])),
        always(C::new("ingestion", "Data Ingestion", "integration", Layer::Integration)
            .tech("Azure Data Factory")
            .variants(&[("fabric", "Fabric Data Pipelines"), ("airflow", "Apache Airflow")])),
        always(C::new("lake", "Data Lake", "storage", Layer::Data)
            .tech("Azure Data Lake Storage Gen2")
            .describe("Bronze / Silver / Gold zones")),
        when("has_databricks", C::new("databricks", "Databricks", "analytics", Layer::Analytics)
            .tech("Azure Databricks")
            .variants(&[("spark", "Apache Spark")])),
        when("has_synapse", C::new("synapse", "Synapse Analytics", "analytics", Layer::Analytics)
            .tech("Azure Synapse Analytics")
            .variants(&[("fabric", "Microsoft Fabric Warehouse"), ("snowflake", "Snowflake")])),
        when("has_ml", C::new("ml", "Machine Learning", "analytics", Layer::Analytics).tech("Azure Machine Learning")),
        when("has_powerbi", C::new("power_bi", "Power BI", "analytics", Layer::Presentation).tech("Power BI")),
        when("has_governance", C::new("governance", "Data Governance", "management", Layer::Management).tech("Microsoft Purview")),
    ],
    connections: &[
        link("sources", "ingestion", INGEST),
        link("sql_source", "ingestion", INGEST),
        link("cosmos_source", "ingestion", INGEST),
        link("streaming", "lake", EdgeStyle::new("data_flow", "stream capture", "")),
        path(&["ingestion", "lake", "databricks", "synapse", "power_bi"], PIPELINE),
        link("databricks", "ml", PIPELINE),
        link("governance", "lake", LINEAGE),
        link("governance", "synapse", LINEAGE),
    ],
    patterns: &["Medallion Architecture", "ELT Pipeline"],
};
