use std::{env, fs::File, process};

use classpeek_class_file::{
    Attribute, AttributeInfo, Attributes, ClassFile, ClassFileError, ConstantPool,
};

fn main() {
    pretty_env_logger::init();

    let args = env::args().collect::<Vec<_>>();
    let [_, path] = args.as_slice() else {
        eprintln!("Usage: classpeek <file.class>");
        process::exit(1);
    };

    let class_file = match File::open(path)
        .map_err(ClassFileError::from)
        .and_then(|file| ClassFile::parse(file))
    {
        Ok(class_file) => class_file,
        Err(e) => {
            log::error!("Failed to decode {}: {}", path, e);
            process::exit(1);
        }
    };

    print_class_file(&class_file);
}

fn print_class_file(class_file: &ClassFile) {
    let pool = &class_file.constant_pool;

    println!("Version: {}.{}", class_file.major_version, class_file.minor_version);

    println!("Constant Pool Count: {}", pool.len() + 1);
    for (i, cp_info) in pool.iter().enumerate() {
        println!(
            "    [{}] {}{{{}}}",
            i + 1,
            cp_info.kind(),
            pool.resolve_value(cp_info)
                .unwrap_or_else(|e| format!("<{}>", e))
        );
    }

    println!("Access Flags: {:?}", class_file.access_flags);
    println!("This Class: {}", resolved(pool, class_file.this_class));
    match class_file.super_class {
        0 => println!("Super Class: none"),
        super_class => println!("Super Class: {}", resolved(pool, super_class)),
    }

    println!("Interfaces Count: {}", class_file.interfaces.len());
    for (i, &interface) in class_file.interfaces.iter().enumerate() {
        println!("    Interface [{}]: {}", i + 1, resolved(pool, interface));
    }

    println!("Fields Count: {}", class_file.fields.len());
    for (i, field) in class_file.fields.iter().enumerate() {
        println!(
            "    Field [{}]: {:?} {} {}",
            i + 1,
            field.access_flags,
            resolved(pool, field.name_index),
            resolved(pool, field.descriptor_index)
        );
        print_attributes(&field.attributes, pool, 2);
    }

    println!("Methods Count: {}", class_file.methods.len());
    for (i, method) in class_file.methods.iter().enumerate() {
        println!(
            "    Method [{}]: {:?} {}{}",
            i + 1,
            method.access_flags,
            resolved(pool, method.name_index),
            resolved(pool, method.descriptor_index)
        );
        print_attributes(&method.attributes, pool, 2);
    }

    println!("Attributes Count: {}", class_file.attributes.len());
    print_attributes(&class_file.attributes, pool, 1);
}

fn print_attributes(attributes: &Attributes, pool: &ConstantPool, depth: usize) {
    for attribute in attributes {
        print_attribute(attribute, pool, depth);
    }
}

fn print_attribute(attribute: &Attribute, pool: &ConstantPool, depth: usize) {
    let indent = "    ".repeat(depth);
    let name = resolved(pool, attribute.attribute_name_index);

    match &attribute.info {
        AttributeInfo::ConstantValue {
            constantvalue_index,
        } => println!("{}{}: {}", indent, name, resolved(pool, *constantvalue_index)),
        AttributeInfo::Code(code) => {
            println!(
                "{}{}: max_stack={} max_locals={} code_length={}",
                indent,
                name,
                code.max_stack,
                code.max_locals,
                code.code.len()
            );
            for entry in &code.exception_table {
                let catch_type = entry
                    .catch_type
                    .map_or_else(|| String::from("any"), |index| resolved(pool, index));
                println!(
                    "{}    [{}, {}) -> {} {}",
                    indent, entry.start_pc, entry.end_pc, entry.handler_pc, catch_type
                );
            }
            print_attributes(&code.attributes, pool, depth + 1);
        }
        AttributeInfo::StackMapTable(entries) => {
            println!("{}{}: {} entries", indent, name, entries.len());
            for entry in entries {
                println!("{}    {:?}", indent, entry);
            }
        }
        AttributeInfo::Exceptions(exception_index_table) => {
            let exceptions = exception_index_table
                .iter()
                .map(|&index| resolved(pool, index))
                .collect::<Vec<_>>();
            println!("{}{}: {}", indent, name, exceptions.join(", "));
        }
        AttributeInfo::BootstrapMethods(bootstrap_methods) => {
            println!("{}{}: {} methods", indent, name, bootstrap_methods.len());
            for (i, method) in bootstrap_methods.iter().enumerate() {
                let arguments = method
                    .bootstrap_arguments
                    .iter()
                    .map(|&index| resolved(pool, index))
                    .collect::<Vec<_>>();
                println!(
                    "{}    [{}] {} ({})",
                    indent,
                    i,
                    resolved(pool, method.bootstrap_method_ref),
                    arguments.join(", ")
                );
            }
        }
        AttributeInfo::Other(info) => {
            println!("{}{}: {} bytes", indent, name, info.len())
        }
    }
}

fn resolved(pool: &ConstantPool, index: u16) -> String {
    pool.resolve(index).unwrap_or_else(|e| {
        log::warn!("Unresolvable constant pool index {}: {}", index, e);
        format!("#{}", index)
    })
}
