use crate::idm::IdentityMgr;

use super::{StoreArgs, open_idm, parse_id, print_json};

pub fn run_group_add(store: &StoreArgs, name: &str) -> anyhow::Result<()> {
    let idm = open_idm(store)?;
    let group = idm.group_add(name)?;
    idm.close()?;

    println!("Created group \"{}\" (gid {})", group.name(), group.gid());
    Ok(())
}

pub fn run_group_del(store: &StoreArgs, name: &str) -> anyhow::Result<()> {
    let idm = open_idm(store)?;
    idm.group_del(name)?;
    idm.close()?;

    println!("Deleted group \"{name}\"");
    Ok(())
}

pub fn run_group_show(
    store: &StoreArgs,
    group: &str,
    by_id: bool,
    json: bool,
) -> anyhow::Result<()> {
    let idm = open_idm(store)?;
    let group = if by_id {
        idm.lookup_group_id(parse_id(group)?)?
    } else {
        idm.lookup_group(group)?
    };
    idm.close()?;

    if json {
        return print_json(&group);
    }
    println!("{}\t{}", group.gid(), group.name());
    Ok(())
}

pub fn run_group_list(store: &StoreArgs, json: bool) -> anyhow::Result<()> {
    let idm = open_idm(store)?;
    let groups = idm.groups()?;
    idm.close()?;

    if json {
        return print_json(&groups);
    }
    for group in &groups {
        println!("{}\t{}", group.gid(), group.name());
    }
    Ok(())
}
