//! Colombian departments and the municipalities offered for each one.

type Department = (&'static str, &'static [&'static str]);

const DEPARTMENTS: &[Department] = &[
    ("Amazonas", &["Leticia", "Puerto Nariño"]),
    (
        "Antioquia",
        &[
            "Medellín", "Bello", "Itagüí", "Envigado", "Apartadó", "Turbo", "Rionegro",
            "Sabaneta", "Caldas", "La Ceja", "Copacabana",
        ],
    ),
    ("Arauca", &["Arauca", "Arauquita", "Saravena", "Fortul", "Tame"]),
    (
        "Atlántico",
        &[
            "Barranquilla", "Soledad", "Malambo", "Sabanalarga", "Puerto Colombia", "Galapa",
            "Baranoa",
        ],
    ),
    (
        "Bolívar",
        &["Cartagena", "Magangué", "Turbaco", "Arjona", "El Carmen de Bolívar", "Mompós"],
    ),
    (
        "Boyacá",
        &[
            "Tunja", "Duitama", "Sogamoso", "Chiquinquirá", "Paipa", "Villa de Leyva",
            "Puerto Boyacá",
        ],
    ),
    ("Caldas", &["Manizales", "La Dorada", "Chinchiná", "Villamaría", "Riosucio"]),
    (
        "Caquetá",
        &["Florencia", "San Vicente del Caguán", "Puerto Rico", "El Doncello"],
    ),
    ("Casanare", &["Yopal", "Aguazul", "Villanueva", "Monterrey", "Paz de Ariporo"]),
    (
        "Cauca",
        &["Popayán", "Santander de Quilichao", "Puerto Tejada", "Patía", "Miranda"],
    ),
    (
        "Cesar",
        &["Valledupar", "Aguachica", "Bosconia", "Codazzi", "La Paz", "San Diego"],
    ),
    ("Chocó", &["Quibdó", "Istmina", "Condoto", "Acandí", "Bahía Solano"]),
    (
        "Córdoba",
        &["Montería", "Cereté", "Lorica", "Sahagún", "Planeta Rica", "Montelíbano"],
    ),
    (
        "Cundinamarca",
        &[
            "Bogotá", "Soacha", "Facatativá", "Zipaquirá", "Chía", "Fusagasugá", "Madrid",
            "Mosquera", "Funza", "Cajicá", "Girardot",
        ],
    ),
    ("Guainía", &["Inírida"]),
    ("Guaviare", &["San José del Guaviare", "Calamar", "El Retorno"]),
    ("Huila", &["Neiva", "Pitalito", "Garzón", "La Plata", "Campoalegre"]),
    (
        "La Guajira",
        &["Riohacha", "Maicao", "Uribia", "Manaure", "San Juan del Cesar"],
    ),
    ("Magdalena", &["Santa Marta", "Ciénaga", "Fundación", "Plato", "El Banco"]),
    (
        "Meta",
        &["Villavicencio", "Acacías", "Granada", "Puerto López", "San Martín"],
    ),
    ("Nariño", &["Pasto", "Tumaco", "Ipiales", "Túquerres", "Samaniego"]),
    (
        "Norte de Santander",
        &["Cúcuta", "Ocaña", "Pamplona", "Villa del Rosario", "Los Patios", "Tibú"],
    ),
    ("Putumayo", &["Mocoa", "Puerto Asís", "Valle del Guamuez", "Orito"]),
    ("Quindío", &["Armenia", "Calarcá", "La Tebaida", "Montenegro", "Quimbaya"]),
    (
        "Risaralda",
        &["Pereira", "Dosquebradas", "Santa Rosa de Cabal", "La Virginia"],
    ),
    ("San Andrés y Providencia", &["San Andrés", "Providencia"]),
    (
        "Santander",
        &[
            "Bucaramanga", "Floridablanca", "Girón", "Piedecuesta", "Barrancabermeja", "San Gil",
            "Socorro",
        ],
    ),
    ("Sucre", &["Sincelejo", "Corozal", "Sampués", "San Marcos", "Tolú"]),
    ("Tolima", &["Ibagué", "Espinal", "Melgar", "Honda", "Chaparral", "Líbano"]),
    (
        "Valle del Cauca",
        &["Cali", "Palmira", "Buenaventura", "Tuluá", "Cartago", "Buga", "Jamundí", "Yumbo"],
    ),
    ("Vaupés", &["Mitú", "Carurú"]),
    ("Vichada", &["Puerto Carreño", "La Primavera", "Cumaribo"]),
];

pub fn departments() -> impl Iterator<Item = &'static str> {
    DEPARTMENTS.iter().map(|(name, _)| *name)
}

pub fn is_known_department(name: &str) -> bool {
    DEPARTMENTS.iter().any(|(department, _)| *department == name)
}

/// Municipalities for a department; unknown departments yield an empty list.
pub fn municipalities_for(department: &str) -> &'static [&'static str] {
    DEPARTMENTS
        .iter()
        .find(|(name, _)| *name == department)
        .map(|(_, municipalities)| *municipalities)
        .unwrap_or(&[])
}
