use nixargs_core::{ArgOption, Command, EnvValues, Flag, OptionSet, ParserSettings, RegistrationError};

const NONE: &[&str] = &[];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn mixed_option_set() -> OptionSet {
    let mut set = OptionSet::new();
    set.add_flags("tag", &["-t", "--tag"], "").unwrap();
    set.add_flags_value("single", &["-s", "--single"], "", "").unwrap();
    set.append(
        ArgOption::new("multi", Flag::from_names(&["-m", "--multi"]))
            .with_values()
            .with_delimiters(","),
    )
    .unwrap();
    set.add_flags_value("deft", &["-df", "--default"], "myDefault", "")
        .unwrap();
    set.add_flags_value("singleMissingValue", &["-sm", "--single-missing"], "", "")
        .unwrap();
    set.add_flag_value("flagX", "-x", "", "").unwrap();
    set.add_flag_value("flagY", "-y", "", "").unwrap();
    set
}

#[test]
fn test_mixed_arguments() {
    let set = mixed_option_set();
    let args = [
        "-t",
        "-un1",
        "val1",
        "--single",
        "singleval1",
        "xxx",
        "-m",
        "multival1",
        "multival2",
        "--multi",
        "multival3,multival4",
        "-sm",
        "-xy",
    ];
    let result = set.parse(&args, NONE);

    assert!(!result.has_flag_key("deft"));
    assert_eq!(result.value("deft"), Some("myDefault"));
    assert_eq!(result.value("single"), Some("singleval1"));
    assert_eq!(
        result.values("multi"),
        Some(&strings(&["multival1", "multival2", "multival3", "multival4"])[..])
    );
    assert!(result.has_flag_key("singleMissingValue"));
    assert!(!result.has_value("singleMissingValue"));
    assert!(result.has_flag_key("flagX"));
    assert!(result.has_flag_key("flagY"));
    assert_eq!(result.undefined_flags(), ["-un1"]);
    assert_eq!(result.rests(), ["xxx"]);
}

#[test]
fn test_bare_characters_merge_without_prefix() {
    let mut set = OptionSet::with_settings(ParserSettings::bare(""));
    set.add_flags_value("deft", &["-df", "--default"], "myDefault", "")
        .unwrap();
    set.add_flag("flag", "-flag", "flag option").unwrap();
    set.add_flag("p", "p", "flag p").unwrap();
    set.add_flag("q", "q", "flag q").unwrap();
    set.add_flags("flags", &["-flags", "--flags"], "flags option")
        .unwrap();
    set.add_flag_value("port", "--port", "21", "port to listen")
        .unwrap();
    set.add_flag_values("ports", "--ports", &["80", "8080"], "ports to listen for http")
        .unwrap();
    set.add_flags_value("file", &["-f", "--files"], "", "file to open")
        .unwrap();
    set.add_flags_values("props", &["-p", "--props"], &[], "properties")
        .unwrap();

    let args = [
        "-flag", "pq", "--flags", "--port", "22", "--ports", "443", "4443", "--ports", "4444", "-f",
        "file1", "file2", "--props", "aa", "bb", "cc", "dd", "ee",
    ];
    let parsed = set.parse(&args, NONE);

    assert_eq!(parsed.value("deft"), Some("myDefault"));
    assert!(parsed.has_flag_key("flag"));
    assert!(parsed.has_flag_key("flags"));
    assert!(parsed.has_flag_key("p"));
    assert!(parsed.has_flag_key("q"));
    assert_eq!(parsed.value("port"), Some("22"));
    assert_eq!(parsed.values("ports").map(<[String]>::len), Some(3));
    assert_eq!(parsed.value("file"), Some("file1"));
    assert_eq!(parsed.values("props").map(<[String]>::len), Some(5));
    assert_eq!(parsed.rests(), ["file2"]);
}

#[test]
fn test_registration_is_atomic() {
    let mut set = OptionSet::new();
    set.add_flag("one", "--one", "").unwrap();

    let err = set.add_flags("two", &["--two", "--one"], "").unwrap_err();
    assert_eq!(err, RegistrationError::DuplicateFlag("--one".to_string()));
    let err = set.add_flag("one", "--uno", "").unwrap_err();
    assert_eq!(err, RegistrationError::DuplicateKey("one".to_string()));

    assert_eq!(set.options().len(), 1);
    assert!(!set.is_flag("--two"));
    assert!(!set.is_flag("--uno"));

    // the rejected names remain free for later registrations
    set.add_flag("two", "--two", "").unwrap();
}

#[test]
fn test_appended_option_is_returned_unchanged() {
    let mut set = OptionSet::with_settings(ParserSettings {
        assign_signs: Vec::new(),
        ..ParserSettings::default()
    });
    let option = ArgOption::new("include", Flag::from_names(&["-I", "--include"]))
        .with_values()
        .with_delimiters(",:")
        .with_defaults(&["."])
        .with_summary("include paths");
    set.append(option.clone()).unwrap();
    assert_eq!(set.option("include"), Some(&option));
}

#[test]
fn test_no_value_flag_round_trip() {
    let mut set = OptionSet::new();
    set.add_flag("tag", "--tag", "").unwrap();
    let result = set.parse(&["--tag"], NONE);
    assert_eq!(result.values("tag"), Some(&[][..]));
    assert!(result.rests().is_empty());
}

#[test]
fn test_multi_value_flag_with_two_spellings() {
    let mut set = OptionSet::new();
    set.append(
        ArgOption::new("multi", Flag::from_names(&["--multi", "--other"]))
            .with_values()
            .with_delimiters(","),
    )
    .unwrap();
    let result = set.parse(&["--multi", "111", "222", "--other", "333,444"], NONE);
    assert_eq!(
        result.values("multi"),
        Some(&strings(&["111", "222", "333", "444"])[..])
    );
}

#[test]
fn test_ambiguous_prefix_binds_nothing() {
    let mut set = OptionSet::new();
    set.add_flag("one", "--foo-one", "").unwrap();
    set.add_flag("two", "--foo-two", "").unwrap();
    let result = set.parse(&["--foo"], NONE);
    assert_eq!(result.ambiguous_flags(), ["--foo"]);
    assert!(!result.has_key("one"));
    assert!(!result.has_key("two"));
}

#[test]
fn test_groups_bind_independently() {
    let mut set = OptionSet::new();
    set.add_flag_value("x", "--x", "", "").unwrap();
    let results = set.parse_groups(&["--x", "1", ",,", "--x", "2"], NONE);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].value("x"), Some("1"));
    assert_eq!(results[1].value("x"), Some("2"));
}

#[test]
fn test_rest_sign_resets_at_group_separator() {
    let mut set = OptionSet::new();
    set.add_flag("tag", "--tag", "").unwrap();
    let results = set.parse_groups(&["--", "--tag", ",,", "--tag"], NONE);
    assert_eq!(results[0].rests(), ["--tag"]);
    assert!(!results[0].has_flag_key("tag"));
    assert!(results[1].has_flag_key("tag"));
}

#[test]
fn test_precedence_specified_env_config_default() {
    let mut set = OptionSet::new();
    set.add_flag_value("key", "--key", "default", "").unwrap();

    let mut env = EnvValues::new();
    env.insert("key".to_string(), strings(&["env"]));
    let no_env = EnvValues::new();

    let result = set.parse_with_env(&["--key", "specified"], &["--key", "config"], &env);
    assert_eq!(result.value("key"), Some("specified"));

    let result = set.parse_with_env(NONE, &["--key", "config"], &env);
    assert_eq!(result.value("key"), Some("env"));

    let result = set.parse_with_env(NONE, &["--key", "config"], &no_env);
    assert_eq!(result.value("key"), Some("config"));

    let result = set.parse_with_env(NONE, NONE, &no_env);
    assert_eq!(result.value("key"), Some("default"));
}

#[test]
fn test_command_routing_with_config() {
    let mut git = Command::simple("git", "A version control tool", &[]);
    let set_url = git
        .new_simple_sub_command("remote", "manage remotes", &[])
        .new_simple_sub_command("set-url", "set remote url", &[]);
    set_url.options_mut().add_flag("push", "--push", "").unwrap();
    set_url
        .options_mut()
        .add_flag_value("name", "--name", "", "")
        .unwrap();

    let result = git.parse(
        &["git", "remote", "set-url", "--push", "origin", "url"],
        &["git", "remote", "set-url", "--name=fromConfig"],
    );
    assert_eq!(result.commands(), ["git", "remote", "set-url"]);
    assert!(result.has_flag_key("push"));
    assert_eq!(result.rests(), ["origin", "url"]);
    assert_eq!(result.value("name"), Some("fromConfig"));
}

#[test]
fn test_result_serializes_to_json() {
    let mut set = OptionSet::new();
    set.add_flag("tag", "--tag", "").unwrap();
    let result = set.parse(&["--tag", "rest", "--nope"], NONE);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["values"]["tag"], serde_json::json!([]));
    assert_eq!(json["rests"], serde_json::json!(["rest"]));
    assert_eq!(json["undefined_flags"], serde_json::json!(["--nope"]));
}

#[test]
fn test_specified_flag_without_value_beats_env_and_default() {
    let mut set = OptionSet::new();
    set.add_flag("verbose", "--verbose", "").unwrap();
    set.add_flag_value("port", "--port", "21", "").unwrap();

    let mut env = EnvValues::new();
    env.insert("verbose".to_string(), strings(&["false"]));

    let result = set.parse_with_env(&["--verbose", "--port"], NONE, &env);
    assert!(result.has_flag_key("verbose"));
    assert_eq!(result.get_bool("verbose").unwrap(), Some(true));
    assert!(result.has_flag_key("port"));
    assert_eq!(result.value("port"), None);

    let result = set.parse_with_env(NONE, NONE, &env);
    assert_eq!(result.get_bool("verbose").unwrap(), Some(false));
    assert_eq!(result.value("port"), Some("21"));
}

#[test]
fn test_short_flag_with_assign_sign() {
    let mut set = OptionSet::new();
    set.add_flag("all", "-a", "").unwrap();
    set.add_flag_value("name", "-n", "", "").unwrap();

    assert_eq!(set.parse(&["-n=foo"], NONE).value("name"), Some("foo"));
    assert_eq!(set.parse(&["-an=foo"], NONE).value("name"), Some("foo"));
    assert_eq!(set.parse(&["-nfoo"], NONE).value("name"), Some("foo"));
}

#[test]
fn test_ambiguous_prefix_with_assign_sign() {
    let mut set = OptionSet::new();
    set.add_flag_value("one", "--foo-one", "", "").unwrap();
    set.add_flag_value("two", "--foo-two", "", "").unwrap();

    let result = set.parse(&["--foo=1", "x"], NONE);
    assert_eq!(result.ambiguous_flags(), ["--foo=1"]);
    assert!(result.undefined_flags().is_empty());
    assert!(result.rests().is_empty());
    assert!(!result.has_key("one"));
}
