use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::config::{BehaviorVersion, Region};
use caliper_bedrock::bedrock::{BedrockSectionGenerator, DEFAULT_MODEL_ID, DEFAULT_SYSTEM_PROMPT};

fn offline_client() -> Client {
    let config = aws_sdk_bedrockruntime::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .build();
    Client::from_conf(config)
}

#[test]
fn generator_keeps_model_and_prompt() {
    let generator =
        BedrockSectionGenerator::new(offline_client(), DEFAULT_MODEL_ID, DEFAULT_SYSTEM_PROMPT);
    assert_eq!(generator.model_id(), DEFAULT_MODEL_ID);
    assert_eq!(generator.system_prompt(), DEFAULT_SYSTEM_PROMPT);
}

#[test]
fn default_prompt_points_at_section_block() {
    assert!(DEFAULT_SYSTEM_PROMPT.contains("<section>"));
    assert!(DEFAULT_SYSTEM_PROMPT.contains("Do not invent measurements"));
}
