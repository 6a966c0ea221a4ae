/// interactive prompt and the fetch-simulate-report driver
pub mod cli_main;
