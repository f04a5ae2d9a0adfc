use std::io::Error;

#[derive(Debug, Clone)]
pub struct CmdArgs {
    pub config: String,
    pub dry_run: bool,
    pub quiet: bool,
}

impl CmdArgs {
    pub fn parse(args: Vec<String>) -> Result<Self, Error> {
        let mut config = String::from("./config.json");
        let mut dry_run = false;
        let mut quiet = false;
        {
            let mut ap = argparse::ArgumentParser::new();
            ap.set_description("Daily case briefing CLI");
            ap.refer(&mut config).add_option(
                &["-c", "--config"],
                argparse::Store,
                "Config file path",
            );
            ap.refer(&mut dry_run).add_option(
                &["-n", "--dry-run"],
                argparse::StoreTrue,
                "Print the briefing instead of delivering it",
            );
            ap.refer(&mut quiet).add_option(
                &["-q", "--quiet"],
                argparse::StoreTrue,
                "Only log warnings and errors",
            );

            match ap.parse(args, &mut std::io::stdout(), &mut std::io::stderr()) {
                Ok(()) => {}
                Err(_) => {
                    return Err(Error::from(std::io::ErrorKind::InvalidInput));
                }
            }
        }

        Ok(CmdArgs {
            config,
            dry_run,
            quiet,
        })
    }
}

#[cfg(test)]
mod test {
    use super::CmdArgs;

    #[test]
    fn defaults_without_options() {
        let args = CmdArgs::parse(vec!["casewire".to_string()]).unwrap();
        assert_eq!(args.config, "./config.json");
        assert!(!args.dry_run);
        assert!(!args.quiet);
    }

    #[test]
    fn parses_all_options() {
        let args = CmdArgs::parse(
            ["casewire", "-c", "/etc/casewire.json", "--dry-run", "-q"]
                .iter()
                .map(std::string::ToString::to_string)
                .collect(),
        )
        .unwrap();
        assert_eq!(args.config, "/etc/casewire.json");
        assert!(args.dry_run);
        assert!(args.quiet);
    }
}
