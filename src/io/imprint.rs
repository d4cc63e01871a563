use chrono::Local;
use clap::crate_version;
use log::info;

pub fn write_header() {
    info!("{: ^80}", "-----------------");
    info!("{: ^80}", "MOINTS");
    info!("{: ^80}", "-----------------");
    let mut version_string: String = "version: ".to_owned();
    version_string.push_str(crate_version!());
    info!("{: ^80}", version_string);
    info!("{: ^80}", "");
    info!("{: ^80}", "::::::::::::::::::::::::::::::::::::::::");
    info!("{: ^80}", "::  molecular-orbital integral reader ::");
    info!("{: ^80}", "::  and dense ERI tensor expansion    ::");
    info!("{: ^80}", "::::::::::::::::::::::::::::::::::::::::");
    info!("{: ^80}", "");
    let time: String = Local::now().format("%d.%m.%Y %H:%M:%S").to_string();
    info!("{: ^80}", time);
    info!("{: ^80}", "");
}
