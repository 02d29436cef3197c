use super::fact::FactShape;

crate::define_key_enum! {
    /// Kind of infrastructure dependency the engine can infer from a repository.
    ///
    /// The serialized keys are the contract with diagram renderers and must
    /// not change once published.
    ServiceCategory {
        LoadBalancer => "lb" : "Load Balancer",
        MessageQueue => "message_queue" : "Message Queue",
        AwsCloudTrail => "aws_cloudtrail" : "AWS CloudTrail",
        AwsLambda => "aws_lambda" : "AWS Lambda",
        Cache => "cache" : "Cache",
        Database => "database" : "Database",
        Docker => "docker" : "Containerization",
        AppServer => "app_server" : "Application Server",
        AwsService => "aws_service" : "AWS Service",
        AwsSqs => "aws_sqs" : "AWS SQS",
        AwsSns => "aws_sns" : "AWS SNS",
        AwsRds => "aws_rds" : "AWS RDS",
        AwsS3 => "aws_s3" : "AWS S3",
        StaticContent => "static_content" : "Static Content",
        WebServer => "web_server" : "Web Server",
    }
}

impl ServiceCategory {
    /// Shape of the detail this category accumulates.
    ///
    /// Custom categories report tags, the most permissive shape, but see
    /// [`ServiceCategory::accepts`].
    pub fn shape(&self) -> FactShape {
        match self {
            Self::LoadBalancer => FactShape::Backends,
            Self::Docker => FactShape::Components,
            Self::AppServer => FactShape::Technology,
            Self::MessageQueue | Self::Cache | Self::Database | Self::Custom(_) => FactShape::Tags,
            Self::AwsCloudTrail
            | Self::AwsLambda
            | Self::AwsService
            | Self::AwsSqs
            | Self::AwsSns
            | Self::AwsRds
            | Self::AwsS3
            | Self::StaticContent
            | Self::WebServer => FactShape::Enabled,
        }
    }

    /// Whether a detail of `shape` may be stored under this category.
    /// Built-in categories take only their own shape; custom ones take any.
    pub fn accepts(&self, shape: FactShape) -> bool {
        matches!(self, Self::Custom(_)) || self.shape() == shape
    }
}
